//! Parser for literal values.
//!
//! Grammar:
//!
//! ```text
//! value   := sign? number | string | 'true' | 'false' | 'null' | 'INF' | 'NAN' | array
//! sign    := '-' | '+'
//! array   := 'array' '(' entries ')' | '[' entries ']'
//! entries := (entry (',' entry)* ','?)?
//! entry   := value ('=>' value)?
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use classforge_syntax::{Value, parser};
//!
//! assert_eq!(parser::parse_literal("-5").unwrap(), Value::Int(-5));
//! assert!(parser::parse_literal("$other").is_err());
//! ```

use crate::diagnostics::{Span, SyntaxError};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::{ArrayBuilder, Key, Value};
use classforge_core::keywords::KeywordId;

/// Nesting limit for arrays, so hostile input cannot exhaust the stack.
pub const MAX_DEPTH: usize = 256;

/// Parser state over a pull-based lexer with one token of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
    consumed: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
            consumed: 0,
            depth: 0,
        }
    }

    /// Byte offset just past the last consumed token.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Parse one value.
    pub fn value(&mut self) -> Result<Value, SyntaxError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Minus | TokenKind::Plus => {
                let negative = token.kind == TokenKind::Minus;
                let operand = self.advance()?;
                signed_number(negative, operand, token.span)
            }
            TokenKind::Int(n) => Ok(i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)),
            TokenKind::Float(f) => Ok(Value::Float(f)),
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::Keyword(KeywordId::True) => Ok(Value::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Ok(Value::Bool(false)),
            TokenKind::Keyword(KeywordId::Null) => Ok(Value::Null),
            TokenKind::Keyword(KeywordId::Array) => {
                self.expect(&TokenKind::LParen, "`(` after `array`")?;
                self.entries(TokenKind::RParen, token.span)
            }
            TokenKind::LBracket => self.entries(TokenKind::RBracket, token.span),
            TokenKind::Ident(name) => match name.as_str() {
                "INF" => Ok(Value::Float(f64::INFINITY)),
                "NAN" => Ok(Value::Float(f64::NAN)),
                _ => Err(SyntaxError::new(format!("`{name}` is not a literal value"), token.span)
                    .with_hint("only scalars and arrays of scalars can be used as default values")),
            },
            other => Err(SyntaxError::new(
                format!("expected a value, found {}", other.describe()),
                token.span,
            )),
        }
    }

    /// Require that nothing but trivia remains.
    pub fn finish(&mut self) -> Result<(), SyntaxError> {
        let token = self.peek()?;
        if token.kind == TokenKind::Eof {
            return Ok(());
        }
        Err(SyntaxError::new(
            format!("unexpected {} after value", token.kind.describe()),
            token.span,
        ))
    }

    fn entries(&mut self, close: TokenKind, open: Span) -> Result<Value, SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::new(format!("arrays nested deeper than {MAX_DEPTH}"), open));
        }

        let mut builder = ArrayBuilder::new();
        loop {
            if self.check(&close)? {
                self.advance()?;
                break;
            }
            let start = self.peek()?.span;
            let first = self.value()?;
            if self.check(&TokenKind::FatArrow)? {
                self.advance()?;
                let Some(key) = Key::from_value(&first) else {
                    return Err(SyntaxError::new("arrays cannot be used as keys", start));
                };
                let value = self.value()?;
                builder.insert(key, value);
            } else {
                builder.push(first);
            }

            if self.check(&TokenKind::Comma)? {
                self.advance()?;
            } else {
                self.expect(&close, &format!("`,` or {}", close.describe()))?;
                break;
            }
        }

        self.depth -= 1;
        Ok(builder.finish())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn peek(&mut self) -> Result<&Token, SyntaxError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.lookahead.insert(token))
    }

    fn advance(&mut self) -> Result<Token, SyntaxError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        if token.kind != TokenKind::Eof {
            self.consumed = token.span.end;
        }
        Ok(token)
    }

    fn check(&mut self, kind: &TokenKind) -> Result<bool, SyntaxError> {
        Ok(&self.peek()?.kind == kind)
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token, SyntaxError> {
        let token = self.advance()?;
        if &token.kind == kind {
            Ok(token)
        } else {
            Err(SyntaxError::new(
                format!("expected {what}, found {}", token.kind.describe()),
                token.span,
            ))
        }
    }
}

fn signed_number(negative: bool, operand: Token, sign: Span) -> Result<Value, SyntaxError> {
    match operand.kind {
        TokenKind::Int(n) if negative => Ok(match 0i64.checked_sub_unsigned(n) {
            Some(v) => Value::Int(v),
            None => Value::Float(-(n as f64)),
        }),
        TokenKind::Int(n) => Ok(i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)),
        TokenKind::Float(f) => Ok(Value::Float(if negative { -f } else { f })),
        TokenKind::Ident(name) if name == "INF" => Ok(Value::Float(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        })),
        other => Err(SyntaxError::new(
            format!("expected a number after sign, found {}", other.describe()),
            sign.merge(operand.span),
        )),
    }
}

/// Parse a complete literal; anything after the value other than whitespace or comments is an error.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_literal(source: &str) -> Result<Value, SyntaxError> {
    let mut parser = Parser::new(source);
    let value = parser.value()?;
    parser.finish()?;
    Ok(value)
}

/// Parse the literal at the front of `source`.
///
/// Returns the value and the byte offset just past it; whatever follows is left unread.
pub fn parse_literal_prefix(source: &str) -> Result<(Value, usize), SyntaxError> {
    let mut parser = Parser::new(source);
    let value = parser.value()?;
    Ok((value, parser.consumed()))
}

// ============================================================================
// TESTS
// ============================================================================
