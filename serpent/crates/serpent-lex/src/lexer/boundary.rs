//! Logical-line boundaries.
//!
//! Newline runs, indentation, intra-line whitespace and backslash
//! continuation. Whether a newline ends a logical line depends on the
//! bracket depth and on the token before it, which is why these rules live
//! together.

use crate::classify::{indent_step, is_horizontal_space, is_indent_space, FORM_FEED};
use crate::error::{LexError, LexResult};
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Length in characters of one `\f? \r? \n` at the cursor, or 0.
    pub(crate) fn newline_len(&self) -> usize {
        let mut len = 0;
        if self.cursor.check(len, FORM_FEED) {
            len += 1;
        }
        if self.cursor.check(len, '\r') {
            len += 1;
        }
        if self.cursor.check(len, '\n') {
            len + 1
        } else {
            0
        }
    }

    /// Length in characters of one `\r? \n` at the cursor, or 0.
    fn line_break_len(&self) -> usize {
        match (self.cursor.peek(0), self.cursor.peek(1)) {
            (Some('\n'), _) => 1,
            (Some('\r'), Some('\n')) => 2,
            _ => 0,
        }
    }

    /// Consumes a run of `\r? \n`.
    pub(crate) fn eat_line_breaks(&mut self) {
        loop {
            let len = self.line_break_len();
            if len == 0 {
                break;
            }
            self.cursor.advance_n(len);
        }
    }

    /// Lexes a run of newlines.
    ///
    /// The run ends a logical line only outside brackets and after some
    /// token on the same line. Right after a continuation it is always
    /// visible.
    pub(crate) fn lex_newline(&mut self) -> Token<'a> {
        let at_line_start = self.at_line_start();
        loop {
            let len = self.newline_len();
            if len == 0 {
                break;
            }
            self.cursor.advance_n(len);
        }

        let visible =
            self.state.after_continuation || (!at_line_start && !self.state.in_brackets());
        self.token(TokenKind::Newline, visible)
    }

    /// Lexes spaces and tabs at the start of a physical line.
    ///
    /// Followed by `#` the run belongs to a line-start comment. Inside
    /// brackets it is plain whitespace. Otherwise it is indentation: the
    /// run is measured with tab stops of 8 and its text becomes that many
    /// spaces, and any blank lines after it are folded into the token.
    pub(crate) fn lex_line_start_space(&mut self) -> Token<'a> {
        let mut width = 0;
        while let Some(c) = self.cursor.current() {
            if !is_indent_space(c) {
                break;
            }
            width = indent_step(width, c);
            self.cursor.advance();
        }

        if self.cursor.check(0, '#') {
            return self.lex_line_comment();
        }
        if self.state.in_brackets() {
            return self.token(TokenKind::Whitespace, false);
        }

        self.eat_line_breaks();
        Token::synthesized(
            TokenKind::LeadingWhitespace,
            " ".repeat(width as usize),
            self.token_span(),
            false,
        )
    }

    /// Lexes whitespace inside a line.
    pub(crate) fn lex_whitespace(&mut self) -> Token<'a> {
        self.cursor.eat_while(is_horizontal_space);
        self.token(TokenKind::Whitespace, false)
    }

    /// Lexes `\` + line break + following spaces and tabs.
    pub(crate) fn lex_continuation(&mut self) -> LexResult<Token<'a>> {
        self.cursor.advance();
        let len = self.line_break_len();
        if len == 0 {
            return Err(if self.cursor.is_at_end() {
                LexError::UnterminatedEscape {
                    span: self.token_span(),
                }
            } else {
                self.unrecognized('\\')
            });
        }
        self.cursor.advance_n(len);
        self.cursor.eat_while(|c| c == ' ' || c == '\t');
        Ok(self.token(TokenKind::LineContinuation, false))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LexError;
    use crate::token::{Token, TokenKind};
    use crate::Lexer;

    fn lex_all(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.is_eof() {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    fn summary(source: &str) -> Vec<(TokenKind, bool)> {
        lex_all(source).iter().map(|t| (t.kind, t.visible)).collect()
    }

    #[test]
    fn test_newline_after_statement_is_visible() {
        let tokens = lex_all("pass\n");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert!(tokens[1].visible);
    }

    #[test]
    fn test_newline_run_is_one_token() {
        let tokens = lex_all("x\n\r\n\n");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "\n\r\n\n");
    }

    #[test]
    fn test_newline_at_stream_start_is_invisible() {
        assert_eq!(
            summary("\n\nx"),
            vec![(TokenKind::Newline, false), (TokenKind::Name, true)]
        );
    }

    #[test]
    fn test_blank_line_is_invisible() {
        let tokens = lex_all("x\n\ny");
        // The whole run after x is one visible token
        assert_eq!(tokens[1].text, "\n\n");
        assert!(tokens[1].visible);
    }

    #[test]
    fn test_newlines_inside_brackets_are_invisible() {
        assert_eq!(
            summary("(\n\n)"),
            vec![
                (TokenKind::LParen, true),
                (TokenKind::Newline, false),
                (TokenKind::RParen, true),
            ]
        );
    }

    #[test]
    fn test_form_feed_in_newline_run() {
        let tokens = lex_all("x\u{000C}\ny");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "\u{000C}\n");
    }

    #[test]
    fn test_lone_carriage_return_is_rejected() {
        let mut lexer = Lexer::new("x\ry");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedCharacter {
                ch: '\r',
                span: serpent_util::Span::new(1, 2, 1, 1),
            }
        );
    }

    #[test]
    fn test_leading_whitespace_text_is_spaces() {
        let tokens = lex_all("if x:\n    y");
        let indent = &tokens[5];
        assert_eq!(indent.kind, TokenKind::LeadingWhitespace);
        assert_eq!(indent.text, "    ");
        assert!(!indent.visible);
        assert_eq!(indent.indent_width(), Some(4));
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        let tokens = lex_all("\t\ty");
        assert_eq!(tokens[0].indent_width(), Some(16));
        let tokens = lex_all("   \ty");
        assert_eq!(tokens[0].indent_width(), Some(8));
        assert_eq!(tokens[0].span.len(), 4);
        let tokens = lex_all("\t  y");
        assert_eq!(tokens[0].indent_width(), Some(10));
    }

    #[test]
    fn test_form_feed_ends_indent() {
        let tokens = lex_all("    \u{000C}  y");
        assert_eq!(tokens[0].kind, TokenKind::LeadingWhitespace);
        assert_eq!(tokens[0].indent_width(), Some(4));
        assert_eq!(tokens[0].span.range(), 0..4);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].text, "\u{000C}  ");
        assert_eq!(tokens[2].kind, TokenKind::Name);
    }

    #[test]
    fn test_form_feed_at_column_zero_is_whitespace() {
        assert_eq!(
            summary("\u{000C}x"),
            vec![(TokenKind::Whitespace, false), (TokenKind::Name, true)]
        );
    }

    #[test]
    fn test_form_feed_blank_line_after_comment_is_newline() {
        let tokens = lex_all("# c\n\u{000C}\nx");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "\u{000C}\n");
        assert!(!tokens[1].visible);
        assert_eq!(tokens[2].kind, TokenKind::Name);
    }

    #[test]
    fn test_whitespace_only_line_absorbs_newlines() {
        let tokens = lex_all("x\n   \n\n  y");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::LeadingWhitespace,
                TokenKind::LeadingWhitespace,
                TokenKind::Name,
            ]
        );
        assert_eq!(tokens[2].source_text("x\n   \n\n  y"), "   \n\n");
        assert_eq!(tokens[2].text, "   ");
    }

    #[test]
    fn test_line_start_space_in_brackets_is_whitespace() {
        assert_eq!(
            summary("[\n  1]"),
            vec![
                (TokenKind::LBrack, true),
                (TokenKind::Newline, false),
                (TokenKind::Whitespace, false),
                (TokenKind::Int, true),
                (TokenKind::RBrack, true),
            ]
        );
    }

    #[test]
    fn test_intra_line_whitespace() {
        let tokens = lex_all("a \t\u{000C} b");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].text, " \t\u{000C} ");
        assert!(!tokens[1].visible);
    }

    #[test]
    fn test_continuation_joins_lines() {
        assert_eq!(
            summary("x = \\\n    1"),
            vec![
                (TokenKind::Name, true),
                (TokenKind::Whitespace, false),
                (TokenKind::Assign, true),
                (TokenKind::Whitespace, false),
                (TokenKind::LineContinuation, false),
                (TokenKind::Int, true),
            ]
        );
        let tokens = lex_all("x = \\\r\n\t 1");
        assert_eq!(tokens[4].text, "\\\r\n\t ");
    }

    #[test]
    fn test_newline_after_continuation_is_visible() {
        let tokens = lex_all("x \\\n\ny");
        assert_eq!(tokens[2].kind, TokenKind::LineContinuation);
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert!(tokens[3].visible);
    }

    #[test]
    fn test_form_feed_newline_after_continuation_is_visible() {
        let tokens = lex_all("x \\\n\u{000C}\ny");
        assert_eq!(tokens[2].kind, TokenKind::LineContinuation);
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[3].text, "\u{000C}\n");
        assert!(tokens[3].visible);
    }

    #[test]
    fn test_newline_after_continuation_in_brackets_is_visible() {
        let tokens = lex_all("(x \\\n\n)");
        assert_eq!(tokens[3].kind, TokenKind::LineContinuation);
        assert_eq!(tokens[4].kind, TokenKind::Newline);
        assert!(tokens[4].visible);
    }

    #[test]
    fn test_backslash_at_end_of_input() {
        let mut lexer = Lexer::new("x \\");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedEscape { .. }));
        assert_eq!(err.span().start, 2);
    }

    #[test]
    fn test_backslash_before_other_character() {
        let mut lexer = Lexer::new("\\ x");
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, LexError::UnrecognizedCharacter { ch: '\\', .. }));
    }
}
