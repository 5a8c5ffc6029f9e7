//! String literal lexing.
//!
//! This module handles the `r`, `u` and `ur` prefixes and the four quoting
//! forms. Escapes are delimited, not decoded: a backslash always takes the
//! next character with it, in raw strings too.

use crate::classify::is_quote;
use crate::error::{LexError, LexResult, QuoteForm};
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Length of a string prefix at the cursor, if a quote follows it.
    ///
    /// Only lowercase `r`, `u` and `ur` are prefixes.
    pub(crate) fn string_prefix_len(&self) -> Option<usize> {
        let len = match (self.cursor.peek(0), self.cursor.peek(1)) {
            (Some('u'), Some('r')) => 2,
            (Some('r' | 'u'), _) => 1,
            _ => return None,
        };
        self.cursor.peek(len).filter(|&c| is_quote(c)).map(|_| len)
    }

    /// Lexes a string literal after a prefix of `prefix_len` characters.
    pub(crate) fn lex_string(&mut self, prefix_len: usize) -> LexResult<Token<'a>> {
        self.cursor.advance_n(prefix_len);
        let quote = if self.cursor.check(0, '"') { '"' } else { '\'' };

        let form = if self.cursor.check(1, quote) && self.cursor.check(2, quote) {
            self.cursor.advance_n(3);
            if quote == '"' {
                QuoteForm::TripleDouble
            } else {
                QuoteForm::TripleSingle
            }
        } else {
            self.cursor.advance();
            if quote == '"' {
                QuoteForm::Double
            } else {
                QuoteForm::Single
            }
        };

        if form.is_triple() {
            self.lex_triple_body(quote, form)?;
        } else {
            self.lex_single_body(quote, form)?;
        }
        Ok(self.token(TokenKind::String, true))
    }

    /// Scans up to and including the closing triple quote.
    ///
    /// Raw newlines are ordinary body characters here.
    fn lex_triple_body(&mut self, quote: char, form: QuoteForm) -> LexResult<()> {
        loop {
            match self.cursor.current() {
                None => return Err(self.unterminated(form)),
                Some('\\') => self.eat_escape()?,
                Some(c) if c == quote && self.cursor.check(1, quote) && self.cursor.check(2, quote) => {
                    self.cursor.advance_n(3);
                    return Ok(());
                },
                Some(_) => {
                    self.cursor.advance();
                },
            }
        }
    }

    /// Scans up to and including the closing quote on the same line.
    fn lex_single_body(&mut self, quote: char, form: QuoteForm) -> LexResult<()> {
        loop {
            match self.cursor.current() {
                None | Some('\n') => return Err(self.unterminated(form)),
                Some('\\') => self.eat_escape()?,
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return Ok(());
                },
                Some(_) => {
                    self.cursor.advance();
                },
            }
        }
    }

    /// Consumes a backslash and whatever character follows it.
    fn eat_escape(&mut self) -> LexResult<()> {
        self.cursor.advance();
        match self.cursor.advance() {
            Some(_) => Ok(()),
            None => Err(LexError::UnterminatedEscape {
                span: self.token_span(),
            }),
        }
    }

    fn unterminated(&self, form: QuoteForm) -> LexError {
        LexError::UnterminatedString {
            form,
            span: self.token_span(),
        }
    }
}
