//! Session context for one lexing run.

/// Cross-token state consulted by several scanning rules.
///
/// Created with the lexer and discarded with it. Only the operator scanner
/// changes `bracket_depth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerState {
    /// Open brackets not yet closed. Never negative.
    pub(crate) bracket_depth: u32,
    /// True until the first character is consumed.
    pub(crate) at_stream_start: bool,
    /// True while the previous token was a backslash continuation.
    pub(crate) after_continuation: bool,
    /// Closing brackets seen at depth zero.
    pub(crate) unmatched_closers: u32,
}

impl LexerState {
    /// State at the start of a session.
    pub const fn new() -> Self {
        Self {
            bracket_depth: 0,
            at_stream_start: true,
            after_continuation: false,
            unmatched_closers: 0,
        }
    }

    /// The implicit line joining level.
    #[inline]
    pub fn bracket_depth(&self) -> u32 {
        self.bracket_depth
    }

    /// Returns true if no character has been consumed yet.
    #[inline]
    pub fn at_stream_start(&self) -> bool {
        self.at_stream_start
    }

    /// Returns true if the last token was a line continuation.
    #[inline]
    pub fn after_continuation(&self) -> bool {
        self.after_continuation
    }

    /// Closing brackets that arrived with no open bracket.
    #[inline]
    pub fn unmatched_closers(&self) -> u32 {
        self.unmatched_closers
    }

    /// Returns true inside `(`, `[` or `{`.
    #[inline]
    pub fn in_brackets(&self) -> bool {
        self.bracket_depth > 0
    }
}

impl Default for LexerState {
    fn default() -> Self {
        Self::new()
    }
}
