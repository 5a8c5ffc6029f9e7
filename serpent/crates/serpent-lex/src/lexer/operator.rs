//! Operator and punctuation lexing.
//!
//! Longer operators win over their prefixes. Brackets are the only tokens
//! that move the bracket depth.

use crate::error::LexResult;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an operator, delimiter or bracket starting with `c`.
    pub(crate) fn lex_operator(&mut self, c: char) -> LexResult<Token<'a>> {
        self.cursor.advance();
        let kind = match c {
            '(' => self.open_bracket(TokenKind::LParen),
            ')' => self.close_bracket(TokenKind::RParen),
            '[' => self.open_bracket(TokenKind::LBrack),
            ']' => self.close_bracket(TokenKind::RBrack),
            '{' => self.open_bracket(TokenKind::LCurly),
            '}' => self.close_bracket(TokenKind::RCurly),
            '@' => TokenKind::At,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '`' => TokenKind::Backquote,
            '~' => TokenKind::Tilde,
            '+' => self.with_equal(TokenKind::PlusEqual, TokenKind::Plus),
            '-' => self.with_equal(TokenKind::MinusEqual, TokenKind::Minus),
            '%' => self.with_equal(TokenKind::PercentEqual, TokenKind::Percent),
            '&' => self.with_equal(TokenKind::AmperEqual, TokenKind::Amper),
            '|' => self.with_equal(TokenKind::VbarEqual, TokenKind::Vbar),
            '^' => self.with_equal(TokenKind::CircumflexEqual, TokenKind::Circumflex),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '=' => self.with_equal(TokenKind::Equal, TokenKind::Assign),
            '!' if self.cursor.match_char('=') => TokenKind::NotEqual,
            c => return Err(self.unrecognized(c)),
        };
        Ok(self.token(kind, true))
    }

    /// Picks `with` if a `=` follows, consuming it.
    fn with_equal(&mut self, with: TokenKind, without: TokenKind) -> TokenKind {
        if self.cursor.match_char('=') {
            with
        } else {
            without
        }
    }

    /// Handles: `*`, `*=`, `**`, `**=`
    fn lex_star(&mut self) -> TokenKind {
        if self.cursor.match_char('*') {
            self.with_equal(TokenKind::DoubleStarEqual, TokenKind::DoubleStar)
        } else {
            self.with_equal(TokenKind::StarEqual, TokenKind::Star)
        }
    }

    /// Handles: `/`, `/=`, `//`, `//=`
    fn lex_slash(&mut self) -> TokenKind {
        if self.cursor.match_char('/') {
            self.with_equal(TokenKind::DoubleSlashEqual, TokenKind::DoubleSlash)
        } else {
            self.with_equal(TokenKind::SlashEqual, TokenKind::Slash)
        }
    }

    /// Handles: `<`, `<=`, `<>`, `<<`, `<<=`
    fn lex_less(&mut self) -> TokenKind {
        if self.cursor.match_char('<') {
            self.with_equal(TokenKind::LeftShiftEqual, TokenKind::LeftShift)
        } else if self.cursor.match_char('>') {
            TokenKind::AltNotEqual
        } else {
            self.with_equal(TokenKind::LessEqual, TokenKind::Less)
        }
    }

    /// Handles: `>`, `>=`, `>>`, `>>=`
    fn lex_greater(&mut self) -> TokenKind {
        if self.cursor.match_char('>') {
            self.with_equal(TokenKind::RightShiftEqual, TokenKind::RightShift)
        } else {
            self.with_equal(TokenKind::GreaterEqual, TokenKind::Greater)
        }
    }

    fn open_bracket(&mut self, kind: TokenKind) -> TokenKind {
        self.state.bracket_depth += 1;
        kind
    }

    /// Closes a bracket. At depth zero the depth stays zero and the closer
    /// is counted as unmatched.
    fn close_bracket(&mut self, kind: TokenKind) -> TokenKind {
        if self.state.bracket_depth == 0 {
            self.state.unmatched_closers += 1;
            tracing::warn!(
                line = self.token_span().line,
                column = self.token_span().column,
                bracket = %kind,
                "closing bracket with no open bracket"
            );
        } else {
            self.state.bracket_depth -= 1;
        }
        kind
    }
}
