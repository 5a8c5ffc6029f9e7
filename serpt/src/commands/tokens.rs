//! Tokens command implementation.
//!
//! Prints the token stream of each input file, either as aligned text
//! lines or as one JSON object per token.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use serpent_lex::{Lexer, StreamMode, Token, TokenStream};
use serpent_util::SourceFile;

use crate::commands::common::{display_name, error_messages, read_source, OutputFormat};
use crate::commands::traits::Command;
use crate::config::TokensConfig;
use crate::error::{Result, SerptError};

/// Arguments for the tokens command.
#[derive(Debug, Clone, Default)]
pub struct TokensArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Files to lex.
    pub files: Vec<PathBuf>,
    /// Only list visible tokens.
    pub visible: bool,
    /// Output format, overriding the configuration.
    pub format: Option<OutputFormat>,
    /// Configured defaults.
    pub config: TokensConfig,
}

/// One token as printed in JSON output.
#[derive(Debug, Serialize)]
struct TokenRecord<'t> {
    file: &'t str,
    kind: &'static str,
    id: i16,
    text: &'t str,
    start: usize,
    end: usize,
    line: u32,
    column: u32,
    visible: bool,
}

impl<'t> TokenRecord<'t> {
    fn new(file: &'t str, token: &'t Token<'_>) -> Self {
        Self {
            file,
            kind: token.kind.name(),
            id: token.kind.id(),
            text: token.text.as_ref(),
            start: token.span.start,
            end: token.span.end,
            line: token.span.line,
            column: token.span.column,
            visible: token.visible,
        }
    }
}

/// Tokens command handler.
pub struct TokensCommand {
    args: TokensArgs,
}

impl TokensCommand {
    /// Stream mode requested by flags and configuration.
    pub fn mode(&self) -> StreamMode {
        if self.args.visible || !self.args.config.include_hidden {
            StreamMode::Visible
        } else {
            StreamMode::Full
        }
    }

    /// Output format requested by flags and configuration.
    pub fn format(&self) -> OutputFormat {
        self.args.format.unwrap_or(self.args.config.format)
    }

    /// Write every file's listing to `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.args.files.is_empty() {
            return Err(SerptError::Validation(error_messages::NO_INPUT_FILES.to_string()));
        }

        let with_headers = self.args.files.len() > 1 && self.format() == OutputFormat::Text;
        for (index, path) in self.args.files.iter().enumerate() {
            let name = display_name(path);
            let source = read_source(path)?;
            let file = SourceFile::new(index, name.as_str(), source.as_str());

            if with_headers {
                if index > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "==> {} <==", name)?;
            }
            let count = self.render_file(&file, out)?;
            if self.args.verbose {
                tracing::info!(file = %name, tokens = count, "listed tokens");
            }
        }
        Ok(())
    }

    /// List one file. Returns the number of tokens printed, Eof included.
    fn render_file<W: Write>(&self, file: &SourceFile, out: &mut W) -> Result<usize> {
        let lexer = Lexer::with_file(file.content(), file.id());
        let mut stream = TokenStream::new(lexer, self.mode());
        let mut count = 0;
        loop {
            let token = match stream.next_token() {
                Ok(token) => token,
                Err(err) => {
                    eprintln!("{}", err.to_diagnostic_in(file));
                    return Err(err.into());
                },
            };
            self.write_token(file.name(), &token, out)?;
            count += 1;
            if token.is_eof() {
                return Ok(count);
            }
        }
    }

    fn write_token<W: Write>(&self, file: &str, token: &Token<'_>, out: &mut W) -> Result<()> {
        match self.format() {
            OutputFormat::Text => {
                writeln!(
                    out,
                    "{}:{} {} {} {:?}",
                    token.span.line,
                    token.span.column,
                    token.kind,
                    if token.visible { "visible" } else { "hidden" },
                    token.text
                )?;
            },
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &TokenRecord::new(file, token))?;
                writeln!(out)?;
            },
        }
        Ok(())
    }
}

impl Command for TokensCommand {
    type Args = TokensArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render(&mut out)?;
        out.flush()?;
        Ok(())
    }

    fn name() -> &'static str {
        "tokens"
    }
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs) -> Result<()> {
    tracing::debug!(command = TokensCommand::name(), files = args.files.len(), "running");
    TokensCommand::new(args).execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn render(args: TokensArgs) -> Result<String> {
        let mut out = Vec::new();
        TokensCommand::new(args).render(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_text_listing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.py", "x = 1\n");
        let output = render(TokensArgs {
            files: vec![path],
            ..TokensArgs::default()
        })
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "1:0 NAME visible \"x\"");
        assert_eq!(lines[1], "1:1 WS hidden \" \"");
        assert_eq!(lines[2], "1:2 ASSIGN visible \"=\"");
        assert_eq!(lines.last(), Some(&"2:0 EOF visible \"\""));
    }

    #[test]
    fn test_visible_listing_hides_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.py", "x = 1  # c\n");
        let output = render(TokensArgs {
            files: vec![path],
            visible: true,
            ..TokensArgs::default()
        })
        .unwrap();
        assert!(!output.contains("hidden"));
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_config_can_hide_invisible_tokens() {
        let args = TokensArgs {
            config: TokensConfig {
                include_hidden: false,
                ..TokensConfig::default()
            },
            ..TokensArgs::default()
        };
        assert_eq!(TokensCommand::new(args).mode(), StreamMode::Visible);
    }

    #[test]
    fn test_json_listing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.py", "pass");
        let output = render(TokensArgs {
            files: vec![path],
            format: Some(OutputFormat::Json),
            ..TokensArgs::default()
        })
        .unwrap();

        let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(first["kind"], "PASS");
        assert_eq!(first["text"], "pass");
        assert_eq!(first["start"], 0);
        assert_eq!(first["end"], 4);
        assert_eq!(first["visible"], true);
        let eof: serde_json::Value = serde_json::from_str(output.lines().nth(1).unwrap()).unwrap();
        assert_eq!(eof["id"], -1);
    }

    #[test]
    fn test_headers_for_several_files() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.py", "a");
        let b = write_file(&dir, "b.py", "b");
        let output = render(TokensArgs {
            files: vec![a, b],
            ..TokensArgs::default()
        })
        .unwrap();
        assert_eq!(output.matches("==> ").count(), 2);
    }

    #[test]
    fn test_lex_error_is_returned() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.py", "x = 'open\n");
        let result = render(TokensArgs {
            files: vec![path],
            ..TokensArgs::default()
        });
        assert!(matches!(result, Err(SerptError::Lex(_))));
    }

    #[test]
    fn test_no_files() {
        let result = render(TokensArgs::default());
        assert!(matches!(result, Err(SerptError::Validation(_))));
    }
}
