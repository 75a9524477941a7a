//! Token types for the literal lexer.
//!
//! Reserved words are carried as `Keyword(KeywordId)` so the parser never compares spellings.

use crate::diagnostics::Span;
use classforge_core::keywords::{self, KeywordId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Ident(String),
    /// Unsigned integer; the sign is applied by the parser so `-9223372036854775808` stays an integer.
    Int(u64),
    Float(f64),
    String(String),

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    FatArrow, // =>
    Minus,
    Plus,
    Semicolon,

    Eof,
}

impl TokenKind {
    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("keyword `{}`", keywords::as_str(*id)),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(f) => format!("float `{f}`"),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::LBracket => "`[`".to_string(),
            TokenKind::RBracket => "`]`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::FatArrow => "`=>`".to_string(),
            TokenKind::Minus => "`-`".to_string(),
            TokenKind::Plus => "`+`".to_string(),
            TokenKind::Semicolon => "`;`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
