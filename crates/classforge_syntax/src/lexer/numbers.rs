//! Numeric literal scanning.

use super::Lexer;
use super::tokens::TokenKind;
use crate::diagnostics::{Span, SyntaxError};

impl<'a> Lexer<'a> {
    /// Scan a number whose first character (digit or `.`) has been consumed.
    pub(super) fn scan_number(&mut self, start: usize) -> Result<TokenKind, SyntaxError> {
        let source = self.source;
        let first = &source[start..];
        if first.starts_with('0') {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                return self.scan_radix(start, radix);
            }
        }

        let mut is_float = first.starts_with('.');
        self.take_decimal_digits();
        if !is_float && self.peek() == Some('.') && self.peek_next() != Some('.') {
            is_float = true;
            self.advance();
            self.take_decimal_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) && self.exponent_follows() {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.take_decimal_digits();
        }

        let span = Span::new(start, self.offset());
        let text: String = source[span.start..span.end].chars().filter(|c| *c != '_').collect();

        if is_float {
            return text
                .parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| SyntaxError::new(format!("invalid float literal `{text}`"), span));
        }

        // A leading zero means octal, as in `0755`.
        if text.len() > 1 && text.starts_with('0') {
            return radix_value(&text[1..], 8, span);
        }
        match text.parse::<u64>() {
            Ok(n) => Ok(TokenKind::Int(n)),
            // Integers past the 64-bit range degrade to floats.
            Err(_) => text
                .parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| SyntaxError::new(format!("invalid integer literal `{text}`"), span)),
        }
    }

    fn scan_radix(&mut self, start: usize, radix: u32) -> Result<TokenKind, SyntaxError> {
        let digits_start = self.offset();
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let span = Span::new(start, self.offset());
        let digits: String = self.source[digits_start..span.end].chars().filter(|c| *c != '_').collect();
        if digits.is_empty() {
            return Err(SyntaxError::new("missing digits after radix prefix", span));
        }
        radix_value(&digits, radix, span)
    }

    fn take_decimal_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn exponent_follows(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        match ahead.next().map(|(_, c)| c) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => ahead.next().is_some_and(|(_, c)| c.is_ascii_digit()),
            _ => false,
        }
    }
}

fn radix_value(digits: &str, radix: u32, span: Span) -> Result<TokenKind, SyntaxError> {
    let mut acc: u64 = 0;
    let mut overflowed = false;
    let mut approx: f64 = 0.0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return Err(SyntaxError::new(format!("invalid digit `{c}` in base-{radix} literal"), span));
        };
        approx = approx * f64::from(radix) + f64::from(d);
        match acc.checked_mul(u64::from(radix)).and_then(|v| v.checked_add(u64::from(d))) {
            Some(v) => acc = v,
            None => overflowed = true,
        }
    }
    Ok(if overflowed { TokenKind::Float(approx) } else { TokenKind::Int(acc) })
}
