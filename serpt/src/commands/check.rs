//! Check command implementation.
//!
//! Lexes every input file on a rayon pool, renders lexical errors with a
//! source snippet, and confirms the full token stream reproduces the
//! source text.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use serpent_lex::{reconstruct, tokenize, tokenize_recovering, Token};
use serpent_util::{Diagnostic, FileId, Handler, SourceFile, SourceMap, Span};

use crate::commands::common::{display_name, error_messages, read_source};
use crate::commands::traits::Command;
use crate::config::CheckConfig;
use crate::error::{Result, SerptError};

/// Arguments for the check command.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Files to check.
    pub files: Vec<PathBuf>,
    /// Keep lexing after an error.
    pub recover: bool,
    /// Diagnostics printed per file, 0 for no limit.
    pub max_errors: u32,
    /// Confirm the token stream reproduces the source.
    pub verify_roundtrip: bool,
    /// Number of parallel jobs.
    pub jobs: u32,
}

impl CheckArgs {
    /// Arguments for `files` with the configured defaults.
    pub fn from_config(files: Vec<PathBuf>, config: &CheckConfig) -> Self {
        Self {
            verbose: false,
            files,
            recover: config.recover,
            max_errors: config.max_errors,
            verify_roundtrip: config.verify_roundtrip,
            jobs: config.jobs,
        }
    }
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self::from_config(Vec::new(), &CheckConfig::default())
    }
}

/// Outcome of checking one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Display name of the file.
    pub name: String,
    /// Tokens produced, Eof included.
    pub tokens: usize,
    /// Errors and warnings, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

/// Totals over all checked files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Files checked.
    pub files: usize,
    /// Files with at least one error.
    pub failed: usize,
    /// Errors over all files.
    pub errors: usize,
    /// Warnings over all files.
    pub warnings: usize,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Read every input into a source map, in input order.
    ///
    /// A file that cannot be read keeps its place as an error.
    pub fn load_sources(&self) -> (SourceMap, Vec<Result<FileId>>) {
        let mut map = SourceMap::new();
        let loaded = self
            .args
            .files
            .iter()
            .map(|path| -> Result<FileId> {
                let source = read_source(path)?;
                Ok(map.add_file(display_name(path), source))
            })
            .collect();
        (map, loaded)
    }

    /// Check a single file of `map`.
    pub fn check_file(&self, map: &SourceMap, id: FileId) -> Result<FileReport> {
        let file = map.get_file(id)?;
        let name = file.name().to_string();

        let (tokens, mut diagnostics) = if self.args.recover {
            let handler = Handler::new();
            let tokens = tokenize_recovering(file.content(), &handler);
            (tokens, handler.take_diagnostics())
        } else {
            match tokenize(file.content()) {
                Ok(tokens) => (tokens, Vec::new()),
                Err(err) => (Vec::new(), vec![err.to_diagnostic()]),
            }
        };

        let clean = !diagnostics.iter().any(Diagnostic::is_error);
        if self.args.verify_roundtrip && clean {
            if let Some(diagnostic) = roundtrip_mismatch(&file, &tokens) {
                diagnostics.push(diagnostic);
            }
        }

        let diagnostics = diagnostics
            .into_iter()
            .map(|diagnostic| with_snippet(&file, diagnostic))
            .collect();

        Ok(FileReport {
            name,
            tokens: tokens.len(),
            diagnostics,
        })
    }

    /// Check all files on a pool of `jobs` threads, in input order.
    pub fn check_all(&self) -> Result<Vec<Result<FileReport>>> {
        if self.args.files.is_empty() {
            return Err(SerptError::Validation(error_messages::NO_INPUT_FILES.to_string()));
        }
        if self.args.jobs == 0 {
            return Err(SerptError::Validation(error_messages::ZERO_JOBS.to_string()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.args.jobs as usize)
            .build()
            .map_err(|e| {
                SerptError::CommandExecution(format!("Failed to start worker pool: {}", e))
            })?;

        let (map, loaded) = self.load_sources();
        tracing::debug!(files = map.file_count(), jobs = self.args.jobs, "checking");

        Ok(pool.install(|| {
            loaded
                .into_par_iter()
                .map(|entry| entry.and_then(|id| self.check_file(&map, id)))
                .collect()
        }))
    }

    /// Print the reports and tally them.
    pub fn report(&self, reports: &[Result<FileReport>]) -> CheckSummary {
        let mut summary = CheckSummary {
            files: reports.len(),
            ..CheckSummary::default()
        };

        for report in reports {
            let report = match report {
                Ok(report) => report,
                Err(err) => {
                    eprintln!("error: {}", err);
                    summary.failed += 1;
                    summary.errors += 1;
                    continue;
                },
            };

            let limit = match self.args.max_errors {
                0 => usize::MAX,
                n => n as usize,
            };
            for diagnostic in report.diagnostics.iter().take(limit) {
                eprintln!("--> {}\n{}\n", report.name, diagnostic);
            }
            if report.diagnostics.len() > limit {
                eprintln!(
                    "--> {}: {} more diagnostic(s) not shown\n",
                    report.name,
                    report.diagnostics.len() - limit
                );
            }

            let errors = report.error_count();
            if errors > 0 {
                summary.failed += 1;
            }
            summary.errors += errors;
            summary.warnings += report.warning_count();

            if self.args.verbose {
                tracing::info!(
                    file = %report.name,
                    tokens = report.tokens,
                    errors,
                    "checked"
                );
            }
        }
        summary
    }
}

/// Attaches a snippet of `file` unless the diagnostic already has one.
fn with_snippet(file: &SourceFile, diagnostic: Diagnostic) -> Diagnostic {
    if !diagnostic.snippets.is_empty() {
        return diagnostic;
    }
    match file.snippet(diagnostic.span, None) {
        Some(snippet) => diagnostic.with_snippet(snippet),
        None => diagnostic,
    }
}

/// An error diagnostic at the first byte where the tokens stop matching
/// the source, or `None` when they reproduce it exactly.
fn roundtrip_mismatch(file: &SourceFile, tokens: &[Token<'_>]) -> Option<Diagnostic> {
    let source = file.content();
    let rebuilt = reconstruct(tokens, source);
    if rebuilt == source {
        return None;
    }

    let offset = source
        .bytes()
        .zip(rebuilt.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| source.len().min(rebuilt.len()));
    let (line, column) = file.offset_to_line_col(offset);
    let span = Span::with_file(
        offset,
        offset,
        file.id(),
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    );
    Some(
        Diagnostic::error("token stream does not reproduce the source", span).with_note(format!(
            "source is {} bytes, tokens cover {}",
            source.len(),
            rebuilt.len()
        )),
    )
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = CheckSummary;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        let start_time = Instant::now();
        let reports = self.check_all()?;
        let summary = self.report(&reports);

        println!(
            "checked {} file(s): {} error(s), {} warning(s)",
            summary.files, summary.errors, summary.warnings
        );
        tracing::debug!(elapsed = ?start_time.elapsed(), "check finished");

        if summary.failed > 0 {
            return Err(SerptError::Validation(format!(
                "{} file(s) with lexical errors",
                summary.failed
            )));
        }
        Ok(summary)
    }

    fn name() -> &'static str {
        "check"
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<()> {
    tracing::debug!(command = CheckCommand::name(), files = args.files.len(), "running");
    CheckCommand::new(args).execute().map(|_| ())
}
