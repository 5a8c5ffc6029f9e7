//! Diagnostic builder for fluent diagnostic construction.
//!
//! This module provides the [`DiagnosticBuilder`] type for constructing
//! diagnostics with a fluent API, including source code snippets.

use super::{Diagnostic, DiagnosticCode, Handler, Level, Span};

/// A source code snippet for display in diagnostics
///
/// Columns are 0-based character positions within `line`; the highlighted
/// range is `start_column..end_column`.
///
/// # Examples
///
/// ```
/// use serpent_util::diagnostic::SourceSnippet;
///
/// let snippet = SourceSnippet::new("x = 0x", 1, 4, 6, Some("no hex digits"));
/// assert_eq!(
///     snippet.format(),
///     "  1 | x = 0x\n    |     ^^ no hex digits"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSnippet {
    /// The source line content
    pub line: String,
    /// Line number (1-based)
    pub line_number: usize,
    /// Column where the issue starts (0-based)
    pub start_column: usize,
    /// Column where the issue ends (0-based, exclusive)
    pub end_column: usize,
    /// Optional label to display under the highlighted range
    pub label: Option<String>,
}

impl SourceSnippet {
    /// Create a new source snippet
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        start_column: usize,
        end_column: usize,
        label: Option<impl Into<String>>,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
            label: label.map(Into::into),
        }
    }

    /// Format the snippet for display
    ///
    /// Returns the source line behind a line-number gutter, followed by a
    /// caret line under the highlighted range. Empty ranges get one caret.
    pub fn format(&self) -> String {
        let line_num_width = self.line_number.to_string().len().max(3);
        let mut result = format!(
            "{:>width$} | {}\n",
            self.line_number,
            self.line,
            width = line_num_width
        );
        result.push_str(&format!("{:>width$} | ", "", width = line_num_width));

        let underline_len = self.end_column.saturating_sub(self.start_column).max(1);
        result.push_str(&" ".repeat(self.start_column));
        result.push_str(&"^".repeat(underline_len));

        if let Some(ref label) = self.label {
            result.push(' ');
            result.push_str(label);
        }

        result
    }
}

/// Builder for constructing diagnostics with a fluent API
///
/// # Examples
///
/// ```
/// use serpent_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Level};
/// use serpent_util::Span;
///
/// let diag = DiagnosticBuilder::error("unrecognized character '?'")
///     .code(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR)
///     .span(Span::new(2, 3, 1, 2))
///     .help("remove the character")
///     .build();
///
/// assert_eq!(diag.level, Level::Error);
/// assert_eq!(diag.helps.len(), 1);
/// ```
#[derive(Debug)]
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    code: Option<DiagnosticCode>,
    helps: Vec<String>,
    snippets: Vec<SourceSnippet>,
}

impl DiagnosticBuilder {
    /// Create a new diagnostic builder
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            code: None,
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Create an error builder
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a warning builder
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Set the diagnostic code
    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the source span
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Add a help suggestion to the diagnostic
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Add a source code snippet
    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Add a snippet only when one is available
    pub fn maybe_snippet(self, snippet: Option<SourceSnippet>) -> Self {
        match snippet {
            Some(snippet) => self.snippet(snippet),
            None => self,
        }
    }

    /// Build the diagnostic
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            code: self.code,
            notes: Vec::new(),
            helps: self.helps,
            snippets: self.snippets,
        }
    }

    /// Build and emit the diagnostic to the given handler
    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}
