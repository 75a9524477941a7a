//! Diagnostics for literal parsing.

use miette::Diagnostic;
use thiserror::Error;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A literal that could not be lexed or parsed.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{message} at offset {}", span.start)]
#[diagnostic(code(classforge::syntax))]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    #[help]
    pub hint: Option<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
