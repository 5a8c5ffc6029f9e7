//! Numeric literal lexing.
//!
//! Numbers are delimited and classified, never converted. Trailing letters
//! that are not part of the literal are left for the next token, so
//! `123abc` is an INT followed by a NAME.

use crate::error::{LexError, LexResult, NumberIssue};
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an INT, LONGINT, FLOAT or COMPLEX literal.
    ///
    /// Handles: `42`, `0777`, `0xFF`, `10L`, `1.`, `.5`, `1.5e-3`, `2e10`,
    /// `3j`, `0x1j`, `1.5J`
    pub(crate) fn lex_number(&mut self) -> LexResult<Token<'a>> {
        if self.cursor.check(0, '0') && matches!(self.cursor.peek(1), Some('x' | 'X')) {
            self.cursor.advance_n(2);
            if self.cursor.eat_while(|c| c.is_ascii_hexdigit()) == 0 {
                return Err(self.malformed(NumberIssue::MissingHexDigits));
            }
            return Ok(self.finish_integer());
        }

        self.cursor.eat_while(|c| c.is_ascii_digit());
        let mut is_float = false;

        if self.cursor.match_char('.') {
            is_float = true;
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        if matches!(self.cursor.current(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some('+' | '-')) {
                self.cursor.advance();
            }
            if self.cursor.eat_while(|c| c.is_ascii_digit()) == 0 {
                return Err(self.malformed(NumberIssue::MissingExponentDigits));
            }
            is_float = true;
        }

        if !is_float {
            return Ok(self.finish_integer());
        }

        if matches!(self.cursor.current(), Some('l' | 'L')) {
            self.cursor.advance();
            return Err(self.malformed(NumberIssue::LongSuffixOnFloat));
        }
        let kind = if self.eat_imaginary() {
            TokenKind::Complex
        } else {
            TokenKind::Float
        };
        Ok(self.token(kind, true))
    }

    /// Applies an optional `L` or `j` suffix to an integer.
    fn finish_integer(&mut self) -> Token<'a> {
        let kind = if matches!(self.cursor.current(), Some('l' | 'L')) {
            self.cursor.advance();
            TokenKind::LongInt
        } else if self.eat_imaginary() {
            TokenKind::Complex
        } else {
            TokenKind::Int
        };
        self.token(kind, true)
    }

    fn eat_imaginary(&mut self) -> bool {
        self.cursor.match_char('j') || self.cursor.match_char('J')
    }

    fn malformed(&self, issue: NumberIssue) -> LexError {
        LexError::MalformedNumericLiteral {
            issue,
            span: self.token_span(),
        }
    }
}
