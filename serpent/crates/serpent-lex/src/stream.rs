//! Full and parser-facing views of the token stream.
//!
//! A parser wants only visible tokens. Tools that rewrite or reformat
//! source want all of them. Both views are built over the same [`Lexer`].

use std::iter::FusedIterator;

use crate::error::LexResult;
use crate::lexer::Lexer;
use crate::token::Token;

/// Which tokens a [`TokenStream`] yields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Every token, visible or not.
    #[default]
    Full,
    /// Only tokens with `visible` set.
    Visible,
}

/// A token stream over a lexer, optionally hiding invisible tokens.
///
/// # Example
///
/// ```
/// use serpent_lex::{Lexer, StreamMode, TokenKind, TokenStream};
///
/// let mut stream = TokenStream::new(Lexer::new("a  # note\nb"), StreamMode::Visible);
/// assert_eq!(stream.next_token().unwrap().kind, TokenKind::Name);
/// assert_eq!(stream.next_token().unwrap().kind, TokenKind::Newline);
/// assert_eq!(stream.next_token().unwrap().kind, TokenKind::Name);
/// assert!(stream.next_token().unwrap().is_eof());
/// ```
#[derive(Clone, Debug)]
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    mode: StreamMode,
    done: bool,
}

impl<'a> TokenStream<'a> {
    /// Wraps `lexer` in a stream of the given mode.
    pub fn new(lexer: Lexer<'a>, mode: StreamMode) -> Self {
        Self {
            lexer,
            mode,
            done: false,
        }
    }

    /// The stream mode.
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// The underlying lexer.
    pub fn lexer(&self) -> &Lexer<'a> {
        &self.lexer
    }

    /// Unwraps the stream.
    pub fn into_inner(self) -> Lexer<'a> {
        self.lexer
    }

    /// Returns the next token this view exposes.
    ///
    /// Eof is always exposed. Errors leave the lexer rewound as
    /// [`Lexer::next_token`] does.
    pub fn next_token(&mut self) -> LexResult<Token<'a>> {
        loop {
            let token = self.lexer.next_token()?;
            if self.mode == StreamMode::Full || token.visible {
                return Ok(token);
            }
        }
    }

    /// Skips one character after an error. See [`Lexer::skip_char`].
    pub fn skip_char(&mut self) -> Option<char> {
        self.lexer.skip_char()
    }
}

/// Stops before Eof and after the first error.
impl<'a> Iterator for TokenStream<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.done = true;
                None
            },
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            },
        }
    }
}

impl FusedIterator for TokenStream<'_> {}
