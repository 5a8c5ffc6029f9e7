//! Character classes used by the scanners.
//!
//! Identifiers follow ASCII rules only: a letter or underscore, then letters,
//! digits or underscores. There is no Unicode identifier support.

/// Tab stop used when measuring indentation.
pub const TAB_WIDTH: u32 = 8;

/// Form feed, accepted as horizontal whitespace and before newlines.
pub const FORM_FEED: char = '\u{000C}';

/// Returns true if `c` can start an identifier.
///
/// # Example
///
/// ```
/// use serpent_lex::classify::is_ident_start;
///
/// assert!(is_ident_start('_'));
/// assert!(!is_ident_start('1'));
/// assert!(!is_ident_start('é'));
/// ```
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` can continue an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true for intra-line whitespace: space, tab and form feed.
#[inline]
pub fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | FORM_FEED)
}

/// Returns true for a character that can indent a line: space and tab.
#[inline]
pub fn is_indent_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Returns true for a character that begins a string body.
#[inline]
pub fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Advances `column` over one indentation character.
///
/// Spaces add one and tabs move to the next multiple of [`TAB_WIDTH`].
///
/// # Example
///
/// ```
/// use serpent_lex::classify::indent_step;
///
/// assert_eq!(indent_step(0, '\t'), 8);
/// assert_eq!(indent_step(3, '\t'), 8);
/// assert_eq!(indent_step(8, '\t'), 16);
/// assert_eq!(indent_step(5, ' '), 6);
/// ```
#[inline]
pub fn indent_step(column: u32, c: char) -> u32 {
    match c {
        '\t' => (column / TAB_WIDTH + 1) * TAB_WIDTH,
        _ => column + 1,
    }
}
