//! Quoted string scanning.
//!
//! Single-quoted strings only recognise `\\` and `\'`; every other backslash is kept verbatim. Double-quoted
//! strings support the usual control escapes, but variable interpolation is rejected because the result would not
//! be a constant value.

use super::Lexer;
use super::tokens::TokenKind;
use crate::diagnostics::{Span, SyntaxError};

impl<'a> Lexer<'a> {
    /// Scan a single-quoted string; the opening quote has been consumed.
    pub(super) fn scan_single_quoted(&mut self, start: usize) -> Result<TokenKind, SyntaxError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('\'') => return Ok(TokenKind::String(value)),
                Some('\\') => match self.peek() {
                    Some(c @ ('\\' | '\'')) => {
                        self.advance();
                        value.push(c);
                    }
                    _ => value.push('\\'),
                },
                Some(c) => value.push(c),
                None => return Err(unterminated(start, self.offset())),
            }
        }
    }

    /// Scan a double-quoted string; the opening quote has been consumed.
    pub(super) fn scan_double_quoted(&mut self, start: usize) -> Result<TokenKind, SyntaxError> {
        let mut value = String::new();
        loop {
            let at = self.offset();
            match self.advance() {
                Some('"') => return Ok(TokenKind::String(value)),
                Some('\\') => self.scan_escape(&mut value)?,
                Some('$') if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_' || c == '{') => {
                    return Err(
                        SyntaxError::new("interpolated string is not a constant value", Span::new(at, at + 1))
                            .with_hint("use single quotes, or escape the `$`"),
                    );
                }
                Some(c) => value.push(c),
                None => return Err(unterminated(start, self.offset())),
            }
        }
    }

    fn scan_escape(&mut self, value: &mut String) -> Result<(), SyntaxError> {
        let at = self.offset();
        let Some(c) = self.peek() else {
            value.push('\\');
            return Ok(());
        };
        let simple = match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'v' => Some('\u{0B}'),
            'e' => Some('\u{1B}'),
            'f' => Some('\u{0C}'),
            '\\' => Some('\\'),
            '$' => Some('$'),
            '"' => Some('"'),
            _ => None,
        };
        if let Some(escaped) = simple {
            self.advance();
            value.push(escaped);
            return Ok(());
        }

        match c {
            '0'..='7' => {
                let code = self.take_digits(8, 3);
                value.push(char::from(u8::try_from(code & 0xFF).unwrap_or(0)));
            }
            'x' if self.peek_next().is_some_and(|n| n.is_ascii_hexdigit()) => {
                self.advance();
                let code = self.take_digits(16, 2);
                value.push(char::from(u8::try_from(code).unwrap_or(0)));
            }
            'u' if self.peek_next() == Some('{') => {
                self.advance();
                self.advance();
                let code = self.take_digits(16, 6);
                if self.advance() != Some('}') {
                    return Err(SyntaxError::new("unterminated unicode escape", Span::new(at, self.offset())));
                }
                let Some(ch) = char::from_u32(code) else {
                    return Err(SyntaxError::new(
                        format!("invalid unicode code point {code:#x}"),
                        Span::new(at, self.offset()),
                    ));
                };
                value.push(ch);
            }
            // Unknown escapes are kept as written.
            _ => value.push('\\'),
        }
        Ok(())
    }

    fn take_digits(&mut self, radix: u32, max: usize) -> u32 {
        let mut code = 0u32;
        for _ in 0..max {
            match self.peek().and_then(|c| c.to_digit(radix)) {
                Some(d) => {
                    self.advance();
                    code = code * radix + d;
                }
                None => break,
            }
        }
        code
    }
}

fn unterminated(start: usize, end: usize) -> SyntaxError {
    SyntaxError::new("unterminated string", Span::new(start, end))
}
