//! Character cursor for traversing source code.
//!
//! This module provides the `Cursor` struct which maintains position state
//! while iterating through source code characters. It handles UTF-8 encoding
//! correctly and tracks line/column information for error reporting.

/// A cursor for traversing source code character by character.
///
/// Lookahead is unbounded but the lexer never looks further than three
/// characters ahead. End of input is reported as `None` rather than a
/// sentinel character, so a literal `'\0'` in the source stays ordinary.
///
/// # Example
///
/// ```
/// use serpent_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("r'x'");
///
/// assert_eq!(cursor.peek(0), Some('r'));
/// assert_eq!(cursor.peek(1), Some('\''));
/// assert_eq!(cursor.advance(), Some('r'));
/// assert_eq!(cursor.peek(3), None);
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (0-based, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 0,
        }
    }

    /// Returns the character `offset` characters past the current position
    /// without consuming anything, or `None` past the end of input.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("abc");
    /// assert_eq!(cursor.peek(0), Some('a'));
    /// assert_eq!(cursor.peek(2), Some('c'));
    /// assert_eq!(cursor.peek(3), None);
    /// ```
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<char> {
        let rest = self.source.as_bytes().get(self.position..)?;

        // Fast path when every byte up to the requested one is ASCII
        if let Some(window) = rest.get(..=offset) {
            if window.is_ascii() {
                return Some(window[offset] as char);
            }
        } else if rest.is_ascii() {
            return None;
        }

        self.remaining().chars().nth(offset)
    }

    /// Returns the current character, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    /// Returns true if the character `offset` ahead equals `expected`.
    #[inline]
    pub fn check(&self, offset: usize, expected: char) -> bool {
        self.peek(offset) == Some(expected)
    }

    /// Consumes one character and returns it.
    ///
    /// A consumed `\n` moves to the next line and resets the column to 0.
    /// Does nothing at end of input.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes up to `count` characters.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consumes characters while `predicate` holds and returns how many
    /// were consumed.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("123abc");
    /// assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), 3);
    /// assert_eq!(cursor.current(), Some('a'));
    /// ```
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(c) = self.current() {
            if !predicate(c) {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }

    /// Returns true if the cursor is at the end of the source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Matches and consumes the expected character if present.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("**=");
    /// assert!(cursor.match_char('*'));
    /// assert!(cursor.match_char('*'));
    /// assert!(!cursor.match_char('*'));
    /// assert_eq!(cursor.current(), Some('='));
    /// ```
    #[inline]
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.check(0, expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns the current line number (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (0-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the current byte position in the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the source between byte offset `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Returns the source text from the current position to the end.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Returns the full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Creates a snapshot of the current cursor state.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores the cursor to a previously saved snapshot.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("a\nb");
    /// let snapshot = cursor.snapshot();
    /// cursor.advance_n(2);
    /// assert_eq!(cursor.line(), 2);
    /// cursor.restore(snapshot);
    /// assert_eq!((cursor.position(), cursor.line(), cursor.column()), (0, 1, 0));
    /// ```
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// A snapshot of cursor state that can be restored later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// Byte position in source.
    pub position: usize,
    /// Line number (1-based).
    pub line: u32,
    /// Column number (0-based).
    pub column: u32,
}
