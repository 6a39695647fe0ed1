use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::{lexer::Token, SyntaxError, SyntaxKind};
use SyntaxKind::*;

/// Deepest nesting of expressions, types, statements and literal values
/// the grammar follows before giving up on a file
pub(crate) const MAX_DEPTH: u32 = 1000;

/// A token the grammar sees: either a real token or a semicolon that Go
/// inserts automatically at a line break (`raw == None`)
#[derive(Debug, Clone, Copy)]
struct Significant {
    kind: SyntaxKind,
    raw: Option<usize>,
}

pub(crate) struct Parser<'t> {
    src: &'t str,
    tokens: Vec<Token>,
    significant: Vec<Significant>,
    pos: usize,
    raw_pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    /// Below zero while parsing the header of `if`, `for` and `switch`,
    /// where `T {` opens the block rather than a composite literal
    pub(crate) expr_lev: i32,
    /// Set once `x.(type)` was parsed, which makes a switch a type switch
    pub(crate) type_guard: bool,
    depth: u32,
    /// Once nesting went past `MAX_DEPTH` the input is treated as ended
    too_deep: bool,
}

impl<'t> Parser<'t> {
    pub fn new(src: &'t str, tokens: Vec<Token>, errors: Vec<SyntaxError>) -> Self {
        let mut significant = Vec::with_capacity(tokens.len());
        let mut last: Option<SyntaxKind> = None;
        let mut newline = false;
        for (i, token) in tokens.iter().enumerate() {
            if token.kind.is_trivia() {
                // a block comment spanning lines counts as a line break
                if token.kind != TOKEN_LINE_COMMENT && src[token.range].contains('\n') {
                    newline = true;
                }
                continue;
            }
            if newline && last.map_or(false, SyntaxKind::inserts_semicolon) {
                significant.push(Significant {
                    kind: TOKEN_SEMICOLON,
                    raw: None,
                });
            }
            significant.push(Significant {
                kind: token.kind,
                raw: Some(i),
            });
            last = Some(token.kind);
            newline = false;
        }
        if last.map_or(false, SyntaxKind::inserts_semicolon) {
            significant.push(Significant {
                kind: TOKEN_SEMICOLON,
                raw: None,
            });
        }

        Parser {
            src,
            tokens,
            significant,
            pos: 0,
            raw_pos: 0,
            builder: GreenNodeBuilder::new(),
            errors,
            expr_lev: 0,
            type_guard: false,
            depth: 0,
            too_deep: false,
        }
    }

    /// Emit every remaining token into the root node and hand out the tree
    pub fn finish_root(mut self) -> (GreenNode, Vec<SyntaxError>) {
        while self.raw_pos < self.tokens.len() {
            self.emit_raw();
        }
        self.builder.finish_node();
        let mut errors = self.errors;
        errors.sort_by_key(|error| error.range.start());
        (self.builder.finish(), errors)
    }

    /// The root node starts before any leading trivia
    pub fn start_root(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    /// Parse one nested production with `f`, unless the nesting limit was
    /// reached. Past the limit a single error is reported and every
    /// pending production sees the end of input, so all open nodes are
    /// closed and the remaining tokens land in the root.
    pub fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        if self.too_deep {
            return;
        }
        if self.depth >= MAX_DEPTH {
            self.error(format!("exceeded max nesting depth of {}", MAX_DEPTH));
            self.too_deep = true;
            return;
        }
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    pub fn nth(&self, n: usize) -> SyntaxKind {
        if self.too_deep {
            return TOKEN_EOF;
        }
        self.significant
            .get(self.pos + n)
            .map_or(TOKEN_EOF, |token| token.kind)
    }

    /// Index of the current significant token, to detect lack of progress
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    /// Position of the `]` matching the `[` at lookahead `n`, as a
    /// lookahead offset
    pub fn matching_bracket(&self, n: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = n;
        loop {
            match self.nth(i) {
                TOKEN_L_BRACK | TOKEN_L_PAREN | TOKEN_L_BRACE => depth += 1,
                TOKEN_R_BRACK | TOKEN_R_PAREN | TOKEN_R_BRACE => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                TOKEN_EOF => return None,
                _ => {}
            }
            i += 1;
        }
    }

    pub fn bump(&mut self) {
        if self.too_deep {
            return;
        }
        let Some(token) = self.significant.get(self.pos).copied() else {
            return;
        };
        if let Some(raw) = token.raw {
            while self.raw_pos < raw {
                self.emit_raw();
            }
            self.emit_raw();
        }
        self.pos += 1;
    }

    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}, found {}", describe(kind), describe(self.current())));
            false
        }
    }

    /// Statement terminator: a semicolon, or nothing before a closing
    /// `)` or `}`
    pub fn expect_semi(&mut self) {
        match self.current() {
            TOKEN_SEMICOLON => self.bump(),
            TOKEN_R_PAREN | TOKEN_R_BRACE | TOKEN_EOF => {}
            _ => {
                self.error(format!(
                    "expected ';' or newline, found {}",
                    describe(self.current())
                ));
                self.skip_until(&[TOKEN_SEMICOLON, TOKEN_R_BRACE, TOKEN_R_PAREN]);
                self.eat(TOKEN_SEMICOLON);
            }
        }
    }

    /// Wrap tokens in an error node until one of `recovery` (or the end)
    pub fn skip_until(&mut self, recovery: &[SyntaxKind]) {
        if self.at_any(recovery) || self.at(TOKEN_EOF) {
            return;
        }
        self.start(NODE_ERROR);
        while !self.at_any(recovery) && !self.at(TOKEN_EOF) {
            self.bump();
        }
        self.finish();
    }

    /// Report an error and consume the offending token, unless it is
    /// part of `recovery`
    pub fn err_and_bump(&mut self, message: &str, recovery: &[SyntaxKind]) {
        self.error(format!("{}, found {}", message, describe(self.current())));
        if !self.at_any(recovery) && !self.at(TOKEN_EOF) {
            self.start(NODE_ERROR);
            self.bump();
            self.finish();
        }
    }

    pub fn error(&mut self, message: String) {
        if self.too_deep {
            return;
        }
        let range = self.current_range();
        self.errors.push(SyntaxError { message, range });
    }

    pub fn start(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    pub fn finish(&mut self) {
        self.builder.finish_node();
    }

    pub fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    pub fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn current_range(&self) -> TextRange {
        match self.significant.get(self.pos) {
            Some(Significant { raw: Some(raw), .. }) => self.tokens[*raw].range,
            _ => {
                let end = self
                    .tokens
                    .get(self.raw_pos.saturating_sub(1))
                    .map_or(TextSize::from(0), |token| token.range.end());
                TextRange::empty(end)
            }
        }
    }

    fn eat_trivia(&mut self) {
        while self
            .tokens
            .get(self.raw_pos)
            .map_or(false, |token| token.kind.is_trivia())
        {
            self.emit_raw();
        }
    }

    fn emit_raw(&mut self) {
        let token = self.tokens[self.raw_pos];
        self.builder.token(token.kind.into(), &self.src[token.range]);
        self.raw_pos += 1;
    }
}

pub(crate) fn describe(kind: SyntaxKind) -> &'static str {
    match kind {
        TOKEN_IDENT => "identifier",
        TOKEN_L_PAREN => "'('",
        TOKEN_R_PAREN => "')'",
        TOKEN_L_BRACK => "'['",
        TOKEN_R_BRACK => "']'",
        TOKEN_L_BRACE => "'{'",
        TOKEN_R_BRACE => "'}'",
        TOKEN_COMMA => "','",
        TOKEN_DOT => "'.'",
        TOKEN_SEMICOLON => "';'",
        TOKEN_COLON => "':'",
        TOKEN_ASSIGN => "'='",
        TOKEN_DEFINE => "':='",
        TOKEN_STRING | TOKEN_RAW_STRING => "string literal",
        TOKEN_EOF => "end of file",
        kind if kind.is_literal() => "literal",
        kind if (TOKEN_BREAK..=TOKEN_VAR).contains(&kind) => "keyword",
        _ => "operator",
    }
}
