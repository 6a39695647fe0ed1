//! Lossless Go syntax trees on top of `rowan`.

pub mod ast;
mod grammar;
mod kind;
mod lexer;
mod parser;
mod parser_tests;

use std::fmt;

use rowan::{GreenNode, TextRange};

pub use kind::SyntaxKind;
pub use lexer::{lex, Token};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum GoLanguage {}

impl rowan::Language for GoLanguage {
    type Kind = SyntaxKind;

    /// Trees only ever hold kinds converted from `SyntaxKind`
    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_raw(raw.0).unwrap_or(SyntaxKind::TOKEN_ERROR)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<GoLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GoLanguage>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Result of parsing one source file. The tree is always complete, even
/// when errors were found.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// The root node, if the source parsed without errors
    pub fn ok(self) -> Result<SyntaxNode, Vec<SyntaxError>> {
        if self.errors.is_empty() {
            Ok(SyntaxNode::new_root(self.green))
        } else {
            Err(self.errors)
        }
    }
}

pub fn parse(src: &str) -> Parse {
    let (tokens, errors) = lexer::lex(src);
    let mut parser = parser::Parser::new(src, tokens, errors);
    grammar::source_file(&mut parser);
    let (green, errors) = parser.finish_root();
    Parse { green, errors }
}
