//! Span module - Source location tracking.
//!
//! A [`Span`] pairs a half-open byte range with the line and column where the
//! range begins. Lines are 1-based. Columns are 0-based character counts from
//! the start of the physical line, so a span starting right after `\n` has
//! column 0.
//!
//! # Examples
//!
//! ```
//! use serpent_util::span::{FileId, Span};
//!
//! let span = Span::new(10, 20, 2, 4);
//! assert_eq!(span.len(), 10);
//!
//! let span = Span::with_file(10, 20, FileId(1), 2, 4);
//! assert_eq!(span.file_id, FileId(1));
//! ```

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// A unique identifier for a source file
///
/// FileIds are assigned sequentially as files are added to the [`SourceMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    /// Create a new FileId
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the raw index value
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// A dummy FileId for single-buffer use
    pub const DUMMY: FileId = FileId(0);
}

impl Default for FileId {
    #[inline]
    fn default() -> Self {
        Self::DUMMY
    }
}

/// Source location span
///
/// # Examples
///
/// ```
/// use serpent_util::span::Span;
///
/// let span = Span::new(3, 7, 1, 3);
/// assert_eq!(span.range(), 3..7);
/// assert_eq!(span.to_string(), "1:3");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset in source (inclusive)
    pub start: usize,
    /// End byte offset in source (exclusive)
    pub end: usize,
    /// Line number of `start` (1-based)
    pub line: u32,
    /// Column of `start` in characters (0-based)
    pub column: u32,
    /// File identifier
    pub file_id: FileId,
}

impl Span {
    /// Dummy span for diagnostics without a location
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
        file_id: FileId::DUMMY,
    };

    /// Create a new span
    ///
    /// # Arguments
    ///
    /// * `start` - Start byte offset
    /// * `end` - End byte offset
    /// * `line` - Line number (1-based)
    /// * `column` - Column number (0-based)
    #[inline]
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id: FileId::DUMMY,
        }
    }

    /// Create a new span associated with a specific file
    #[inline]
    pub fn with_file(start: usize, end: usize, file_id: FileId, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id,
        }
    }

    /// Returns true if this span is empty (start == end)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the span in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The byte range of this span
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Formats as `line:column`.
impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
