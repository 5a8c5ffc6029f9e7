//! Core lexer implementation.
//!
//! This module contains the main Lexer struct, the per-token dispatch, and
//! the pull-based and iterator interfaces.

use std::iter::FusedIterator;

use serpent_util::{FileId, Span};

use crate::classify::{is_horizontal_space, is_ident_start, is_indent_space, FORM_FEED};
use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::lexer::LexerState;
use crate::stream::{StreamMode, TokenStream};
use crate::token::{Token, TokenKind};

/// Lexer for Python 2 style source.
///
/// The lexer produces one token per call and keeps no token history. Every
/// token, visible or not, covers the bytes it consumed, so the full stream
/// reconstructs the input exactly.
///
/// # Example
///
/// ```
/// use serpent_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("print x");
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Print);
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Whitespace);
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Name);
/// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
/// ```
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Session context shared by the scanners.
    pub(crate) state: LexerState,

    /// File the produced spans belong to.
    file_id: FileId,

    /// Starting position of the current token (byte offset).
    pub(crate) token_start: usize,

    /// Line number where the current token starts (1-based).
    token_start_line: u32,

    /// Column number where the current token starts (0-based).
    token_start_column: u32,

    /// Tokens produced so far, Eof excluded.
    produced: usize,

    /// Set once end of input has been logged.
    reached_eof: bool,

    /// Set once the iterator has yielded its last item.
    fused: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self::with_file(source, FileId::DUMMY)
    }

    /// Creates a lexer whose spans carry `file_id`.
    pub fn with_file(source: &'a str, file_id: FileId) -> Self {
        tracing::debug!(bytes = source.len(), file = file_id.index(), "starting lexing session");
        Self {
            cursor: Cursor::new(source),
            state: LexerState::new(),
            file_id,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 0,
            produced: 0,
            reached_eof: false,
            fused: false,
        }
    }

    /// Returns the next token from the source code.
    ///
    /// Once input is exhausted every call returns a [`TokenKind::Eof`] token
    /// with empty text. On error the lexer rewinds to where the failed token
    /// began and its state is unchanged, so the caller may retry after
    /// [`Lexer::skip_char`] or give up.
    pub fn next_token(&mut self) -> LexResult<Token<'a>> {
        let snapshot = self.cursor.snapshot();
        self.token_start = snapshot.position;
        self.token_start_line = snapshot.line;
        self.token_start_column = snapshot.column;

        let Some(c) = self.cursor.current() else {
            return Ok(self.eof_token());
        };

        match self.dispatch(c) {
            Ok(token) => {
                self.state.at_stream_start = false;
                self.state.after_continuation = token.kind == TokenKind::LineContinuation;
                self.produced += 1;
                tracing::trace!(
                    kind = %token.kind,
                    start = token.span.start,
                    end = token.span.end,
                    visible = token.visible,
                    "token"
                );
                Ok(token)
            },
            Err(err) => {
                self.cursor.restore(snapshot);
                Err(err)
            },
        }
    }

    /// Picks the scanning rule for the character at the cursor.
    fn dispatch(&mut self, c: char) -> LexResult<Token<'a>> {
        let at_line_start = self.at_line_start();

        match c {
            FORM_FEED if self.newline_len() > 0 => Ok(self.lex_newline()),
            c if at_line_start && is_indent_space(c) => Ok(self.lex_line_start_space()),
            c if is_horizontal_space(c) => Ok(self.lex_whitespace()),
            '#' if at_line_start => Ok(self.lex_line_comment()),
            '#' => Ok(self.lex_inline_comment()),
            '\n' => Ok(self.lex_newline()),
            '\r' if self.newline_len() > 0 => Ok(self.lex_newline()),
            '\\' => self.lex_continuation(),
            '\'' | '"' => self.lex_string(0),
            'r' | 'u' => match self.string_prefix_len() {
                Some(prefix) => self.lex_string(prefix),
                None => Ok(self.lex_identifier()),
            },
            c if is_ident_start(c) => Ok(self.lex_identifier()),
            c if c.is_ascii_digit() => self.lex_number(),
            '.' if self.cursor.peek(1).is_some_and(|d| d.is_ascii_digit()) => self.lex_number(),
            c => self.lex_operator(c),
        }
    }

    /// Skips one character after a failed token.
    ///
    /// Returns the skipped character, or `None` at end of input.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("$x");
    /// assert!(lexer.next_token().is_err());
    /// assert_eq!(lexer.skip_char(), Some('$'));
    /// assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Name);
    /// ```
    pub fn skip_char(&mut self) -> Option<char> {
        let skipped = self.cursor.advance()?;
        self.state.at_stream_start = false;
        self.state.after_continuation = false;
        Some(skipped)
    }

    /// A view of this lexer that yields only visible tokens.
    pub fn visible(self) -> TokenStream<'a> {
        TokenStream::new(self, StreamMode::Visible)
    }

    /// The session context.
    pub fn state(&self) -> &LexerState {
        &self.state
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current column number (0-based).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Returns the current byte position in the source.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the source being lexed.
    pub fn source(&self) -> &'a str {
        self.cursor.source()
    }

    /// Returns true if the current token begins a physical line.
    pub(crate) fn at_line_start(&self) -> bool {
        self.state.at_stream_start || self.token_start_column == 0
    }

    /// Span from the start of the current token to the cursor.
    pub(crate) fn token_span(&self) -> Span {
        Span::with_file(
            self.token_start,
            self.cursor.position(),
            self.file_id,
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Finishes the current token with its source text.
    pub(crate) fn token(&self, kind: TokenKind, visible: bool) -> Token<'a> {
        Token::new(
            kind,
            self.cursor.slice_from(self.token_start),
            self.token_span(),
            visible,
        )
    }

    /// Error for the character at the start of the current token.
    pub(crate) fn unrecognized(&self, ch: char) -> LexError {
        let mut span = self.token_span();
        span.end = span.start + ch.len_utf8();
        LexError::UnrecognizedCharacter { ch, span }
    }

    fn eof_token(&mut self) -> Token<'a> {
        if !self.reached_eof {
            self.reached_eof = true;
            tracing::debug!(
                tokens = self.produced,
                lines = self.cursor.line(),
                unmatched_closers = self.state.unmatched_closers,
                "reached end of input"
            );
        }
        let span = Span::with_file(
            self.cursor.position(),
            self.cursor.position(),
            self.file_id,
            self.cursor.line(),
            self.cursor.column(),
        );
        Token::new(TokenKind::Eof, "", span, true)
    }
}

/// Iterates over the full stream, stopping before Eof.
///
/// The first error is yielded and then the iterator is exhausted. Drive
/// [`Lexer::next_token`] directly to resume past errors.
impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.fused = true;
                None
            },
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            },
        }
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .map(|t| t.map(|t| t.kind))
            .collect::<LexResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_empty_source_is_eof() {
        let mut lexer = Lexer::new("");
        let eof = lexer.next_token().unwrap();
        assert!(eof.is_eof());
        assert!(eof.visible);
        assert_eq!(eof.text, "");
        assert_eq!(eof.span, Span::new(0, 0, 1, 0));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Name);
        for _ in 0..3 {
            let eof = lexer.next_token().unwrap();
            assert!(eof.is_eof());
            assert_eq!(eof.span.start, 1);
        }
    }

    #[test]
    fn test_stream_start_flag_cleared() {
        let mut lexer = Lexer::new("x y");
        assert!(lexer.state().at_stream_start());
        lexer.next_token().unwrap();
        assert!(!lexer.state().at_stream_start());
    }

    #[test]
    fn test_error_rewinds_to_token_start() {
        let mut lexer = Lexer::new("x = 'abc\ny");
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        let before = (lexer.position(), lexer.line(), lexer.column());
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.span().start, 4);
        assert_eq!((lexer.position(), lexer.line(), lexer.column()), before);
        // Retrying without skipping fails the same way
        assert_eq!(lexer.next_token().unwrap_err(), err);
    }

    #[test]
    fn test_resume_after_skip() {
        let mut lexer = Lexer::new("a ? b");
        let mut seen = Vec::new();
        loop {
            match lexer.next_token() {
                Ok(token) if token.is_eof() => break,
                Ok(token) => seen.push(token.kind),
                Err(_) => {
                    lexer.skip_char();
                },
            }
        }
        assert_eq!(
            seen,
            vec![
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::Whitespace,
                TokenKind::Name
            ]
        );
    }

    #[test]
    fn test_skip_char_at_end() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.skip_char(), None);
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        assert_eq!(
            kinds("pass\n"),
            vec![TokenKind::Pass, TokenKind::Newline]
        );
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let mut lexer = Lexer::new("x $ y");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_spans_carry_file_id() {
        let mut lexer = Lexer::with_file("x", FileId::new(4));
        assert_eq!(lexer.next_token().unwrap().span.file_id, FileId::new(4));
        assert_eq!(lexer.next_token().unwrap().span.file_id, FileId::new(4));
    }

    #[test]
    fn test_line_and_column_of_tokens() {
        let tokens: Vec<_> = Lexer::new("a\n  b")
            .collect::<LexResult<Vec<_>>>()
            .unwrap();
        let b = tokens.last().unwrap();
        assert_eq!(b.kind, TokenKind::Name);
        assert_eq!((b.span.line, b.span.column), (2, 2));
        assert_eq!(b.span.range(), 4..5);
    }

    #[test]
    fn test_prefix_letters_without_quote_are_names() {
        assert_eq!(kinds("r"), vec![TokenKind::Name]);
        assert_eq!(kinds("ur"), vec![TokenKind::Name]);
        assert_eq!(kinds("u2"), vec![TokenKind::Name]);
    }
}
