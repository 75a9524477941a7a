//! Lexer for literal values.
//!
//! Handles tokenization of:
//! - Keywords (`array`, `true`, `false`, `null`) and bare identifiers (`INF`, `NAN`)
//! - Integer and float literals (decimal, hex, octal, binary, exponents, `_` separators)
//! - Single- and double-quoted strings
//! - Punctuation (`(`, `)`, `[`, `]`, `,`, `=>`, `;`) and unary signs
//!
//! Whitespace and comments (`//`, `#`, `/* */`) between tokens are skipped.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - Quoted string scanning
//! - `numbers` - Numeric literal scanning
//!
//! ## Notes
//! - The lexer is pull-based ([`Lexer::next_token`]) so a literal can be read off the front of arbitrary text
//!   without tokenizing whatever follows it.

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::diagnostics::{Span, SyntaxError};

/// Pull-based lexer over a source string.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |(i, _)| *i)
    }

    /// Scan the next token, skipping leading whitespace and comments.
    ///
    /// Returns an `Eof` token once the input is exhausted, and keeps returning it.
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_trivia()?;
        let start = self.offset();
        let Some(c) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start)));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            '=' if self.peek() == Some('>') => {
                self.advance();
                TokenKind::FatArrow
            }
            '\'' => self.scan_single_quoted(start)?,
            '"' => self.scan_double_quoted(start)?,
            c if c.is_ascii_digit() => self.scan_number(start)?,
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start)?,
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(start),
            other => {
                return Err(SyntaxError::new(
                    format!("unexpected character `{other}`"),
                    Span::new(start, start + other.len_utf8()),
                ));
            }
        };

        Ok(Token::new(kind, Span::new(start, self.offset())))
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn skip_trivia(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => self.skip_line(),
                Some('/') if self.peek_next() == Some('/') => self.skip_line(),
                Some('/') if self.peek_next() == Some('*') => {
                    let start = self.offset();
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(SyntaxError::new("unterminated comment", Span::new(start, self.offset())));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let text = &self.source[start..self.offset()];
        match keyword_id(text) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(text.to_string()),
        }
    }
}

/// Lex a complete source string into tokens, ending with `Eof`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use classforge_core::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_and_keywords() {
        assert_eq!(
            kinds("array( 'a' => TRUE, null )"),
            vec![
                TokenKind::Keyword(KeywordId::Array),
                TokenKind::LParen,
                TokenKind::String("a".into()),
                TokenKind::FatArrow,
                TokenKind::Keyword(KeywordId::True),
                TokenKind::Comma,
                TokenKind::Keyword(KeywordId::Null),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("1 /* one */ , # two\n 2 // three"),
            vec![TokenKind::Int(1), TokenKind::Comma, TokenKind::Int(2), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let err = lex("1 /* never closed").unwrap_err();
        assert_eq!(err.message, "unterminated comment");
        assert_eq!(err.span.start, 2);
    }

    #[test]
    fn spans_are_byte_offsets() {
        let tokens = lex("  'é' ;").unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 6));
        assert_eq!(tokens[1].span, Span::new(7, 8));
    }

    #[test]
    fn lone_equals_is_rejected() {
        let err = lex("= 1").unwrap_err();
        assert_eq!(err.message, "unexpected character `=`");
    }

    #[test]
    fn pull_lexing_stops_where_asked() {
        let mut lexer = Lexer::new("42; $this->broken(");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Int(42));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Semicolon);
        assert_eq!(lexer.offset(), 3);
    }
}
