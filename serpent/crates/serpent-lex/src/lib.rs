//! serpent-lex - Lexical analyzer for Python 2 style source
//!
//! This crate turns source text into the typed token stream a Python 2
//! grammar consumes. It resolves the parts of the language a naive scanner
//! gets wrong: indentation at logical-line starts, implicit line joining
//! inside brackets, backslash continuation, prefixed and triple-quoted
//! strings, and the full family of numeric literals.
//!
//! # Example Usage
//!
//! ```
//! use serpent_lex::{tokenize_visible, Lexer, TokenKind};
//!
//! let source = "if x:\n    y = 1";
//!
//! // The parser-facing view
//! let kinds: Vec<_> = tokenize_visible(source)
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::If,
//!         TokenKind::Name,
//!         TokenKind::Colon,
//!         TokenKind::Newline,
//!         TokenKind::Name,
//!         TokenKind::Assign,
//!         TokenKind::Int,
//!         TokenKind::Eof,
//!     ]
//! );
//!
//! // Or pull tokens one at a time, invisible ones included
//! let mut lexer = Lexer::new(source);
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::If);
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Whitespace);
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Token kinds, their grammar numbers, and tokens
//! - [`lexer`] - The lexer, its session state and the scanning rules
//! - [`stream`] - Full and visible-only views of the stream
//! - [`cursor`] - Character cursor for source traversal
//! - [`classify`] - Character classes and indentation measurement
//! - [`error`] - Lexical errors
//!
//! # Visibility
//!
//! Whitespace, comments, line continuations, indentation and newlines that
//! do not end a logical line are produced with `visible == false`. They stay
//! in the full stream, so concatenating the source text of every token
//! reproduces the input exactly (see [`reconstruct`]).
//!
//! # Errors
//!
//! A failed token leaves the lexer where that token began. Callers either
//! stop, or skip a character with [`Lexer::skip_char`] and carry on;
//! [`tokenize_recovering`] does the latter and reports into a
//! [`Handler`](serpent_util::Handler).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod cursor;
mod edge_cases;
pub mod error;
pub mod lexer;
pub mod stream;
pub mod token;

use serpent_util::{DiagnosticBuilder, DiagnosticCode, Handler};

// Re-export main types for convenience
pub use cursor::Cursor;
pub use error::{LexError, LexResult, NumberIssue, QuoteForm};
pub use lexer::{Lexer, LexerState};
pub use stream::{StreamMode, TokenStream};
pub use token::{keyword_from_ident, Token, TokenKind};

/// Lexes all of `source`, invisible tokens included, ending with Eof.
pub fn tokenize(source: &str) -> LexResult<Vec<Token<'_>>> {
    collect(TokenStream::new(Lexer::new(source), StreamMode::Full))
}

/// Lexes all of `source` keeping only visible tokens, ending with Eof.
pub fn tokenize_visible(source: &str) -> LexResult<Vec<Token<'_>>> {
    collect(TokenStream::new(Lexer::new(source), StreamMode::Visible))
}

fn collect(mut stream: TokenStream<'_>) -> LexResult<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    loop {
        let token = stream.next_token()?;
        let eof = token.is_eof();
        tokens.push(token);
        if eof {
            return Ok(tokens);
        }
    }
}

/// Lexes all of `source`, skipping one character after each error.
///
/// Every error becomes an error diagnostic in `handler`, and every closing
/// bracket with nothing open becomes a warning. The returned stream ends
/// with Eof and is missing only the skipped characters.
///
/// # Example
///
/// ```
/// use serpent_lex::{tokenize_recovering, TokenKind};
/// use serpent_util::Handler;
///
/// let handler = Handler::new();
/// let tokens = tokenize_recovering("a $ b)", &handler);
/// assert_eq!(handler.error_count(), 1);
/// assert_eq!(handler.warning_count(), 1);
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
/// ```
pub fn tokenize_recovering<'a>(source: &'a str, handler: &Handler) -> Vec<Token<'a>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let unmatched = lexer.state().unmatched_closers();
        match lexer.next_token() {
            Ok(token) => {
                if lexer.state().unmatched_closers() > unmatched {
                    DiagnosticBuilder::warning(format!("unmatched closing bracket `{}`", token.text))
                        .code(DiagnosticCode::W_LEXER_UNBALANCED_CLOSER)
                        .span(token.span)
                        .emit(handler);
                }
                let eof = token.is_eof();
                tokens.push(token);
                if eof {
                    return tokens;
                }
            },
            Err(err) => {
                handler.emit_diagnostic(err.to_diagnostic());
                let skipped = lexer.skip_char();
                tracing::warn!(
                    line = err.span().line,
                    column = err.span().column,
                    skipped = ?skipped,
                    "skipping character after lexical error"
                );
            },
        }
    }
}

/// Concatenates the source text of `tokens`.
///
/// For the full stream of `source` the result equals `source`.
///
/// # Example
///
/// ```
/// use serpent_lex::{reconstruct, tokenize};
///
/// let source = "def f(a,\n\tb):  # c\n\treturn a\n";
/// let tokens = tokenize(source).unwrap();
/// assert_eq!(reconstruct(&tokens, source), source);
/// ```
pub fn reconstruct(tokens: &[Token<'_>], source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for token in tokens {
        out.push_str(token.source_text(source));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to collect all tokens from source.
    fn lex_all(source: &str) -> Vec<Token<'_>> {
        let mut tokens = tokenize(source).unwrap();
        assert!(tokens.pop().is_some_and(|t| t.is_eof()));
        tokens
    }

    fn visible_kinds(source: &str) -> Vec<TokenKind> {
        tokenize_visible(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_end_to_end_if_block() {
        let source = "if x:\n    y = 1";
        let visible = tokenize_visible(source).unwrap();
        let summary: Vec<_> = visible
            .iter()
            .map(|t| (t.kind, t.text.as_ref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::If, "if"),
                (TokenKind::Name, "x"),
                (TokenKind::Colon, ":"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Name, "y"),
                (TokenKind::Assign, "="),
                (TokenKind::Int, "1"),
                (TokenKind::Eof, ""),
            ]
        );

        let indent = lex_all(source)
            .into_iter()
            .find(|t| t.kind == TokenKind::LeadingWhitespace)
            .unwrap();
        assert_eq!(indent.text, "    ");
        assert!(!indent.visible);
    }

    #[test]
    fn test_coverage_reconstructs_input() {
        let sources = [
            "",
            "x",
            "class A(object):\n\tdef f(self, *a, **kw):\n\t\treturn `a` <> kw\n",
            "s = r'''multi\nline''' + u\"x\" # tail\r\n",
            "\n\n  # only comments\n\t\n",
            "x = [1,\n     2L, 0x1Fj,\n  .5e-3]\n",
            "print \\\n   'a'\n\u{000C}\n",
        ];
        for source in sources {
            let tokens = tokenize(source).unwrap();
            assert_eq!(reconstruct(&tokens, source), source, "source {:?}", source);
            for pair in tokens.windows(2) {
                assert_eq!(pair[0].span.end, pair[1].span.start);
            }
        }
    }

    #[test]
    fn test_text_matches_span_except_indent() {
        let source = "if a:\n\t  b = 'c'\n";
        for token in lex_all(source) {
            if token.kind != TokenKind::LeadingWhitespace {
                assert_eq!(token.text, token.source_text(source));
            }
        }
    }

    #[test]
    fn test_tab_stop() {
        for n in 1..5 {
            let source = format!("{}x", "\t".repeat(n));
            let tokens = lex_all(&source);
            assert_eq!(tokens[0].indent_width(), Some(8 * n));
        }
    }

    #[test]
    fn test_nested_brackets_join_lines() {
        assert_eq!(
            visible_kinds("(\n\n)"),
            vec![TokenKind::LParen, TokenKind::RParen, TokenKind::Eof]
        );
        assert_eq!(
            visible_kinds("f([\n1,\n2]\n)\n"),
            vec![
                TokenKind::Name,
                TokenKind::LParen,
                TokenKind::LBrack,
                TokenKind::Int,
                TokenKind::Comma,
                TokenKind::Int,
                TokenKind::RBrack,
                TokenKind::RParen,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_precedence() {
        let tokens = lex_all("orange = 1");
        assert_eq!(tokens[0].kind, TokenKind::Name);
        assert_eq!(tokens[0].text, "orange");
        assert_eq!(lex_all("or x")[0].kind, TokenKind::Or);
    }

    #[test]
    fn test_numeric_suffix_composition() {
        let tokens = lex_all("0x1AL");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::LongInt);
        let tokens = lex_all("1e10j");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Complex);
    }

    #[test]
    fn test_string_termination_errors() {
        assert!(matches!(
            tokenize("'abc\n"),
            Err(LexError::UnterminatedString {
                form: QuoteForm::Single,
                ..
            })
        ));
        assert!(matches!(
            tokenize("'''abc"),
            Err(LexError::UnterminatedString {
                form: QuoteForm::TripleSingle,
                ..
            })
        ));
    }

    #[test]
    fn test_decorator() {
        assert_eq!(
            visible_kinds("@dec\ndef f(): pass"),
            vec![
                TokenKind::At,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::Def,
                TokenKind::Name,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Colon,
                TokenKind::Pass,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_recovering_skips_bad_characters() {
        let handler = Handler::new();
        let source = "a = $1 ?\nb";
        let tokens = tokenize_recovering(source, &handler);
        assert_eq!(handler.error_count(), 2);
        let names: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Name)
            .map(|t| t.text.as_ref())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        let diagnostics = handler.diagnostics();
        assert_eq!(diagnostics[0].code, Some(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR));
        assert_eq!(diagnostics[0].span.start, 4);
    }

    #[test]
    fn test_recovering_reports_unmatched_closer() {
        let handler = Handler::new();
        let tokens = tokenize_recovering("x)\n", &handler);
        assert!(!handler.has_errors());
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(
            handler.diagnostics()[0].code,
            Some(DiagnosticCode::W_LEXER_UNBALANCED_CLOSER)
        );
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_recovering_through_unterminated_string() {
        let handler = Handler::new();
        let tokens = tokenize_recovering("s = 'oops\nt = 1\n", &handler);
        assert!(handler.error_count() >= 1);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Name && t.text == "t"));
        assert!(tokens.last().is_some_and(|t| t.is_eof()));
    }
}
