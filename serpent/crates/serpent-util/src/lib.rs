//! serpent-util - Foundation types for the serpent front end
//!
//! This crate holds the pieces every other serpent crate leans on:
//!
//! - [`span`] - byte-offset spans with line/column and the [`SourceMap`]
//!   that turns offsets back into source lines
//! - [`diagnostic`] - errors and warnings, the fluent [`DiagnosticBuilder`],
//!   caret-underlined [`SourceSnippet`]s, stable [`DiagnosticCode`]s, and the
//!   collecting [`Handler`]
//! - [`error`] - failures of the utilities themselves
//!
//! # Example
//!
//! ```
//! use serpent_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span};
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("unrecognized character '$'")
//!     .code(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR)
//!     .span(Span::new(4, 5, 1, 4))
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.error_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet};
pub use error::{SourceMapError, SourceMapResult};
pub use span::{FileId, SourceFile, SourceMap, Span};
