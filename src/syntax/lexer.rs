//! Lossless Go tokenizer.
//!
//! Every byte of the input ends up in exactly one token, including
//! whitespace and comments, so that the syntax tree prints back to the
//! original text. Automatic semicolon insertion is left to the parser,
//! which sees the trivia between significant tokens.

use rowan::{TextRange, TextSize};

use super::{SyntaxError, SyntaxKind};
use SyntaxKind::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn first(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.first()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.first() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(c) = self.first() {
            if !predicate(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Split `src` into tokens. Malformed literals still produce a token
/// covering their text, plus an error.
pub fn lex(src: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    let mut cursor = Cursor { src, pos: 0 };
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(c) = cursor.first() {
        let start = cursor.pos;
        let kind = match c {
            ' ' | '\t' | '\r' | '\n' => {
                cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
                TOKEN_WHITESPACE
            }
            '/' if cursor.second() == Some('/') => {
                cursor.eat_while(|c| c != '\n');
                TOKEN_LINE_COMMENT
            }
            '/' if cursor.second() == Some('*') => {
                match cursor.rest()[2..].find("*/") {
                    Some(end) => cursor.pos += 2 + end + 2,
                    None => {
                        cursor.pos = src.len();
                        errors.push(error("comment not terminated", start, cursor.pos));
                    }
                }
                TOKEN_BLOCK_COMMENT
            }
            c if is_ident_start(c) => {
                cursor.eat_while(is_ident_continue);
                SyntaxKind::from_keyword(&src[start..cursor.pos]).unwrap_or(TOKEN_IDENT)
            }
            '0'..='9' => number(&mut cursor),
            '.' if cursor.second().map_or(false, |c| c.is_ascii_digit()) => number(&mut cursor),
            '"' => {
                cursor.bump();
                if !quoted(&mut cursor, '"') {
                    errors.push(error("string literal not terminated", start, cursor.pos));
                }
                TOKEN_STRING
            }
            '\'' => {
                cursor.bump();
                if !quoted(&mut cursor, '\'') {
                    errors.push(error("rune literal not terminated", start, cursor.pos));
                }
                TOKEN_RUNE
            }
            '`' => {
                cursor.bump();
                match cursor.rest().find('`') {
                    Some(end) => cursor.pos += end + 1,
                    None => {
                        cursor.pos = src.len();
                        errors.push(error("raw string literal not terminated", start, cursor.pos));
                    }
                }
                TOKEN_RAW_STRING
            }
            _ => match operator(cursor.rest()) {
                Some((kind, len)) => {
                    cursor.pos += len;
                    kind
                }
                None => {
                    cursor.bump();
                    errors.push(error(
                        &format!("invalid character {:?}", c),
                        start,
                        cursor.pos,
                    ));
                    TOKEN_ERROR
                }
            },
        };
        tokens.push(Token {
            kind,
            range: range(start, cursor.pos),
        });
    }

    (tokens, errors)
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

fn error(message: &str, start: usize, end: usize) -> SyntaxError {
    SyntaxError {
        message: message.to_string(),
        range: range(start, end),
    }
}

/// Scan the rest of a `"` or `'` literal, returns false if unterminated
fn quoted(cursor: &mut Cursor, quote: char) -> bool {
    loop {
        match cursor.first() {
            None | Some('\n') => return false,
            Some('\\') => {
                cursor.bump();
                // the escaped character can never end the literal
                if cursor.first().map_or(false, |c| c != '\n') {
                    cursor.bump();
                }
            }
            Some(c) => {
                cursor.bump();
                if c == quote {
                    return true;
                }
            }
        }
    }
}

fn number(cursor: &mut Cursor) -> SyntaxKind {
    let mut kind = TOKEN_INT;
    let mut exponent = ['e', 'E'];
    let mut digits: fn(char) -> bool = |c| c.is_ascii_digit() || c == '_';

    if cursor.first() == Some('0') {
        match cursor.second() {
            Some('x' | 'X') => {
                cursor.pos += 2;
                exponent = ['p', 'P'];
                digits = |c| c.is_ascii_hexdigit() || c == '_';
            }
            Some('b' | 'B' | 'o' | 'O') => {
                cursor.pos += 2;
            }
            _ => {}
        }
    }
    cursor.eat_while(digits);

    if cursor.first() == Some('.') {
        cursor.bump();
        kind = TOKEN_FLOAT;
        cursor.eat_while(digits);
    }
    if cursor.first().map_or(false, |c| exponent.contains(&c)) {
        cursor.bump();
        kind = TOKEN_FLOAT;
        if !cursor.eat('+') {
            cursor.eat('-');
        }
        cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
    }
    if cursor.eat('i') {
        kind = TOKEN_IMAGINARY;
    }
    kind
}

fn operator(rest: &str) -> Option<(SyntaxKind, usize)> {
    const OPERATORS: &[(&str, SyntaxKind)] = &[
        ("<<=", TOKEN_SHL_ASSIGN),
        (">>=", TOKEN_SHR_ASSIGN),
        ("&^=", TOKEN_AND_NOT_ASSIGN),
        ("...", TOKEN_ELLIPSIS),
        ("&&", TOKEN_LAND),
        ("||", TOKEN_LOR),
        ("<-", TOKEN_ARROW),
        ("++", TOKEN_INC),
        ("--", TOKEN_DEC),
        ("==", TOKEN_EQL),
        ("!=", TOKEN_NEQ),
        ("<=", TOKEN_LEQ),
        (">=", TOKEN_GEQ),
        (":=", TOKEN_DEFINE),
        ("<<", TOKEN_SHL),
        (">>", TOKEN_SHR),
        ("&^", TOKEN_AND_NOT),
        ("+=", TOKEN_ADD_ASSIGN),
        ("-=", TOKEN_SUB_ASSIGN),
        ("*=", TOKEN_MUL_ASSIGN),
        ("/=", TOKEN_DIV_ASSIGN),
        ("%=", TOKEN_REM_ASSIGN),
        ("&=", TOKEN_AND_ASSIGN),
        ("|=", TOKEN_OR_ASSIGN),
        ("^=", TOKEN_XOR_ASSIGN),
        ("+", TOKEN_ADD),
        ("-", TOKEN_SUB),
        ("*", TOKEN_MUL),
        ("/", TOKEN_DIV),
        ("%", TOKEN_REM),
        ("&", TOKEN_AND),
        ("|", TOKEN_OR),
        ("^", TOKEN_XOR),
        ("<", TOKEN_LSS),
        (">", TOKEN_GTR),
        ("=", TOKEN_ASSIGN),
        ("!", TOKEN_NOT),
        ("~", TOKEN_TILDE),
        ("(", TOKEN_L_PAREN),
        (")", TOKEN_R_PAREN),
        ("[", TOKEN_L_BRACK),
        ("]", TOKEN_R_BRACK),
        ("{", TOKEN_L_BRACE),
        ("}", TOKEN_R_BRACE),
        (",", TOKEN_COMMA),
        (".", TOKEN_DOT),
        (";", TOKEN_SEMICOLON),
        (":", TOKEN_COLON),
    ];
    OPERATORS
        .iter()
        .find(|(op, _)| rest.starts_with(op))
        .map(|(op, kind)| (*kind, op.len()))
}
