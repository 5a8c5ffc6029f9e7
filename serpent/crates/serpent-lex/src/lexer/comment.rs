//! Comment lexing.
//!
//! Comments are always invisible. A comment that starts a physical line,
//! possibly after indentation, swallows the line breaks after it. A comment
//! after code leaves its line break to the newline rule.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Consumes `#` and the comment text up to the line break.
    fn eat_comment_text(&mut self) {
        self.cursor.advance();
        while let Some(c) = self.cursor.current() {
            if c == '\n' || (c == '\r' && self.cursor.check(1, '\n')) {
                break;
            }
            self.cursor.advance();
        }
    }

    /// Lexes a comment at the start of a line.
    ///
    /// Any indentation before the `#` is already consumed as part of the same
    /// token. The comment may end at end of input without a line break.
    pub(crate) fn lex_line_comment(&mut self) -> Token<'a> {
        self.eat_comment_text();
        self.eat_line_breaks();
        self.token(TokenKind::Comment, false)
    }

    /// Lexes a comment that follows code on the same line.
    pub(crate) fn lex_inline_comment(&mut self) -> Token<'a> {
        self.eat_comment_text();
        self.token(TokenKind::Comment, false)
    }
}
