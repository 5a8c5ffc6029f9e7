//! Source map for managing source files and computing source locations.
//!
//! This module provides the [`SourceMap`] type for managing multiple source files
//! and computing line/column information from byte offsets.

use std::sync::Arc;

use super::{FileId, Span};
use crate::diagnostic::SourceSnippet;
use crate::error::{SourceMapError, SourceMapResult};

/// A source file with its content and metadata
///
/// # Examples
///
/// ```
/// use serpent_util::span::SourceFile;
///
/// let file = SourceFile::new(0, "main.py", "if x:\n    pass\n");
/// assert_eq!(file.name(), "main.py");
/// assert_eq!(file.line_at(2), Some("    pass"));
/// ```
#[derive(Clone)]
pub struct SourceFile {
    id: FileId,
    name: String,
    content: Arc<str>,
    /// Byte offsets where each physical line starts
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    /// Create a new source file
    pub fn new(id: usize, name: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::line_starts(&content);
        Self {
            id: FileId(id),
            name: name.into(),
            content,
            line_starts,
        }
    }

    fn line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        line_starts.into()
    }

    /// Get the file identifier
    #[inline]
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Get the file name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the file content
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the total number of lines
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset where a line starts (0-indexed line number)
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Convert a byte offset to (line, column) coordinates
    ///
    /// The line is 1-based. The column is the 0-based number of characters
    /// between the start of the line and `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serpent_util::span::SourceFile;
    ///
    /// let file = SourceFile::new(0, "main.py", "x = 1\ny = 2");
    /// assert_eq!(file.offset_to_line_col(0), (1, 0));
    /// assert_eq!(file.offset_to_line_col(8), (2, 2));
    /// ```
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let col = self
            .content
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| offset.saturating_sub(line_start));
        (line + 1, col)
    }

    /// Get a specific source line (1-indexed), without its line terminator
    pub fn line_at(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let start = self.line_start(line - 1)?;
        let end = self.line_start(line).unwrap_or(self.content.len());
        let line_content = self.content.get(start..end)?;
        Some(line_content.trim_end_matches(['\n', '\r']))
    }

    /// Build a caret snippet for `span` on the line where it starts
    ///
    /// A span reaching past the end of its first line is underlined up to
    /// the end of that line.
    pub fn snippet(&self, span: Span, label: Option<&str>) -> Option<SourceSnippet> {
        let (line_number, start_column) = self.offset_to_line_col(span.start);
        let line = self.line_at(line_number)?;
        let line_len = line.chars().count();
        let end_column = self
            .content
            .get(span.start..span.end)
            .map(|text| start_column + text.chars().take_while(|&c| c != '\n').count())
            .unwrap_or(start_column)
            .min(line_len.max(start_column));
        Some(SourceSnippet::new(
            line,
            line_number,
            start_column,
            end_column,
            label,
        ))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("line_count", &self.line_count())
            .finish()
    }
}

/// A source map managing multiple source files
///
/// # Examples
///
/// ```
/// use serpent_util::span::SourceMap;
///
/// let mut map = SourceMap::new();
/// let file_id = map.add_file("main.py", "pass\n");
/// assert_eq!(map.get(file_id).map(|f| f.line_count()), Some(2));
/// ```
#[derive(Default)]
pub struct SourceMap {
    files: Vec<Arc<SourceFile>>,
}

impl SourceMap {
    /// Create a new empty source map
    #[inline]
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a new source file, returning its [`FileId`]
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<Arc<str>>) -> FileId {
        let file = SourceFile::new(self.files.len(), name, content);
        let file_id = file.id();
        self.files.push(Arc::new(file));
        file_id
    }

    /// Get a source file by its ID
    #[inline]
    pub fn get(&self, id: FileId) -> Option<Arc<SourceFile>> {
        self.files.get(id.0).cloned()
    }

    /// Get a source file by its ID with error handling
    pub fn get_file(&self, id: FileId) -> SourceMapResult<Arc<SourceFile>> {
        self.get(id)
            .ok_or_else(|| SourceMapError::FileNotFound(format!("FileId({})", id.0)))
    }

    /// Get the number of files in the source map
    #[inline]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
