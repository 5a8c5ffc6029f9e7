//! Lexical errors.
//!
//! Every error is local to one token attempt. The span starts where scanning
//! of that token began and ends where the scanner gave up, so a caret
//! snippet underlines the offending text.

use std::fmt;

use serpent_util::{Diagnostic, DiagnosticBuilder, DiagnosticCode, SourceFile, Span};
use thiserror::Error;

/// Quoting form of a string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuoteForm {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
    /// `'''...'''`
    TripleSingle,
    /// `"""..."""`
    TripleDouble,
}

impl QuoteForm {
    /// The closing delimiter for this form.
    pub const fn delimiter(self) -> &'static str {
        match self {
            QuoteForm::Single => "'",
            QuoteForm::Double => "\"",
            QuoteForm::TripleSingle => "'''",
            QuoteForm::TripleDouble => "\"\"\"",
        }
    }

    /// Returns true for the forms whose body may span lines.
    pub const fn is_triple(self) -> bool {
        matches!(self, QuoteForm::TripleSingle | QuoteForm::TripleDouble)
    }
}

impl fmt::Display for QuoteForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuoteForm::Single => "single-quoted",
            QuoteForm::Double => "double-quoted",
            QuoteForm::TripleSingle => "triple-single-quoted",
            QuoteForm::TripleDouble => "triple-double-quoted",
        };
        f.write_str(name)
    }
}

/// Why a numeric literal could not be delimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberIssue {
    /// `0x` with no hex digit after it.
    MissingHexDigits,
    /// An exponent marker with no digits after it.
    MissingExponentDigits,
    /// A long suffix after a float.
    LongSuffixOnFloat,
}

impl fmt::Display for NumberIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NumberIssue::MissingHexDigits => "hexadecimal literal has no digits",
            NumberIssue::MissingExponentDigits => "exponent has no digits",
            NumberIssue::LongSuffixOnFloat => "long suffix is not allowed on a float",
        };
        f.write_str(text)
    }
}

/// A failed token attempt.
///
/// # Example
///
/// ```
/// use serpent_lex::{tokenize, LexError};
///
/// let err = tokenize("x = 'abc\n").unwrap_err();
/// assert!(matches!(err, LexError::UnterminatedString { .. }));
/// assert_eq!(err.span().start, 4);
/// assert_eq!(err.code().as_str(), "E1002");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    /// A string reached a raw newline or end of input before its closing
    /// delimiter.
    #[error("unterminated {form} string starting at {span}")]
    UnterminatedString {
        /// Quoting form of the literal.
        form: QuoteForm,
        /// From the opening prefix or quote to where scanning stopped.
        span: Span,
    },

    /// A backslash was the last character of the input.
    #[error("backslash at end of input at {span}")]
    UnterminatedEscape {
        /// Start of the token containing the backslash.
        span: Span,
    },

    /// A numeric literal has a marker with nothing valid after it.
    #[error("malformed numeric literal at {span}: {issue}")]
    MalformedNumericLiteral {
        /// What is wrong with the literal.
        issue: NumberIssue,
        /// The digits scanned so far, including the bad marker.
        span: Span,
    },

    /// No scanning rule matches the character.
    #[error("unrecognized character {ch:?} at {span}")]
    UnrecognizedCharacter {
        /// The offending character.
        ch: char,
        /// Covers just the character.
        span: Span,
    },
}

impl LexError {
    /// Where scanning of the failed token began.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span, .. }
            | LexError::UnterminatedEscape { span }
            | LexError::MalformedNumericLiteral { span, .. }
            | LexError::UnrecognizedCharacter { span, .. } => *span,
        }
    }

    /// Stable diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            LexError::UnterminatedString { .. } => DiagnosticCode::E_LEXER_UNTERMINATED_STRING,
            LexError::UnterminatedEscape { .. } => DiagnosticCode::E_LEXER_UNTERMINATED_ESCAPE,
            LexError::MalformedNumericLiteral { .. } => DiagnosticCode::E_LEXER_INVALID_NUMBER,
            LexError::UnrecognizedCharacter { .. } => DiagnosticCode::E_LEXER_UNEXPECTED_CHAR,
        }
    }

    fn headline(&self) -> String {
        match self {
            LexError::UnterminatedString { form, .. } => format!("unterminated {form} string"),
            LexError::UnterminatedEscape { .. } => "backslash at end of input".to_string(),
            LexError::MalformedNumericLiteral { issue, .. } => {
                format!("malformed numeric literal: {issue}")
            },
            LexError::UnrecognizedCharacter { ch, .. } => {
                format!("unrecognized character {ch:?}")
            },
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            LexError::UnterminatedString { form, .. } if form.is_triple() => {
                Some(format!("close the string with `{}`", form.delimiter()))
            },
            LexError::UnterminatedString { form, .. } => Some(format!(
                "close the string with `{}` before the end of the line",
                form.delimiter()
            )),
            LexError::MalformedNumericLiteral {
                issue: NumberIssue::LongSuffixOnFloat,
                ..
            } => Some("only integers take an `L` suffix".to_string()),
            _ => None,
        }
    }

    /// Converts the error into a diagnostic without source context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        self.builder().build()
    }

    /// Converts the error into a diagnostic with a caret snippet from `file`.
    pub fn to_diagnostic_in(&self, file: &SourceFile) -> Diagnostic {
        self.builder()
            .maybe_snippet(file.snippet(self.span(), None))
            .build()
    }

    fn builder(&self) -> DiagnosticBuilder {
        let builder = DiagnosticBuilder::error(self.headline())
            .code(self.code())
            .span(self.span());
        match self.help() {
            Some(help) => builder.help(help),
            None => builder,
        }
    }
}

/// Result type for lexing operations.
pub type LexResult<T> = std::result::Result<T, LexError>;
