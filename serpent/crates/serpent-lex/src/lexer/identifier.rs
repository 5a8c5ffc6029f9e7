//! Identifier and keyword lexing.
//!
//! This module handles lexing of identifiers and keywords.

use crate::classify::is_ident_continue;
use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// The whole identifier is scanned first and then looked up, so a
    /// keyword only matches when the identifier is exactly its spelling.
    pub(crate) fn lex_identifier(&mut self) -> Token<'a> {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(self.token_start);
        let kind = keyword_from_ident(text).unwrap_or(TokenKind::Name);
        self.token(kind, true)
    }
}
