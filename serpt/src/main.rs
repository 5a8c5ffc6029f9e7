//! Serpt CLI - command-line front end for the serpent lexer.
//!
//! This is the main entry point for the serpt application. It uses clap
//! for argument parsing and dispatches to the command handlers.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::common::OutputFormat;
use commands::{run_check, run_config, run_tokens, CheckArgs, ConfigArgs, TokensArgs};
use config::Config;
use error::{Result, SerptError};

/// Serpt - tokens and lexical checks for Python 2 sources
///
/// Serpt lists the tokens of source files, checks files for lexical
/// errors, and manages its own configuration.
#[derive(Parser, Debug)]
#[command(name = "serpt")]
#[command(author = "Serpent Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokens and lexical checks for Python 2 sources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "SERPT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SERPT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "SERPT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the serpt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the tokens of source files
    ///
    /// Prints one line (or one JSON object) per token, invisible tokens
    /// included unless --visible is given.
    Tokens(TokensCommand),

    /// Check source files for lexical errors
    ///
    /// Lexes files in parallel, reports every error with a source snippet,
    /// and exits non-zero if any file has errors.
    Check(CheckCommand),

    /// Show the effective configuration
    Config(ConfigCommand),
}

/// Arguments for the tokens subcommand.
#[derive(Parser, Debug)]
struct TokensCommand {
    /// Source files to lex
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Only list tokens a parser would see
    #[arg(long)]
    visible: bool,

    /// Output format (default: from config)
    #[arg(short = 'F', long, value_enum)]
    format: Option<OutputFormat>,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Source files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Stop each file at its first error
    #[arg(long)]
    no_recover: bool,

    /// Diagnostics shown per file, 0 for all (default: from config)
    #[arg(long)]
    max_errors: Option<u32>,

    /// Number of parallel jobs (default: from config)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    jobs: Option<u32>,

    /// Skip the token stream roundtrip check
    #[arg(long)]
    no_roundtrip: bool,
}

/// Arguments for the config subcommand.
#[derive(Parser, Debug)]
struct ConfigCommand {
    /// Write the configuration to this path instead of printing it
    #[arg(short, long)]
    write: Option<PathBuf>,
}

/// Main entry point for the serpt CLI.
///
/// Parses command-line arguments, initializes logging, loads configuration,
/// and dispatches to the appropriate command handler.
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose, config)
}

/// Initialize the logging system.
///
/// Logs go to stderr so token listings on stdout stay machine-readable.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| SerptError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Tokens(args) => execute_tokens(args, verbose, config),
        Commands::Check(args) => execute_check(args, verbose, config),
        Commands::Config(args) => execute_config(args, config),
    }
}

/// Execute the tokens command.
fn execute_tokens(args: TokensCommand, verbose: bool, config: Config) -> Result<()> {
    let tokens_args = TokensArgs {
        verbose,
        files: args.files,
        visible: args.visible,
        format: args.format,
        config: config.tokens,
    };
    run_tokens(tokens_args)
}

/// Execute the check command.
fn execute_check(args: CheckCommand, verbose: bool, config: Config) -> Result<()> {
    let mut check_args = CheckArgs::from_config(args.files, &config.check);
    check_args.verbose = verbose;
    if args.no_recover {
        check_args.recover = false;
    }
    if args.no_roundtrip {
        check_args.verify_roundtrip = false;
    }
    if let Some(max_errors) = args.max_errors {
        check_args.max_errors = max_errors;
    }
    if let Some(jobs) = args.jobs {
        check_args.jobs = jobs;
    }
    run_check(check_args)
}

/// Execute the config command.
fn execute_config(args: ConfigCommand, config: Config) -> Result<()> {
    run_config(ConfigArgs {
        config,
        write: args.write,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tokens() {
        let cli = Cli::parse_from(["serpt", "tokens", "a.py"]);
        if let Commands::Tokens(args) = cli.command {
            assert_eq!(args.files, vec![PathBuf::from("a.py")]);
            assert!(!args.visible);
            assert_eq!(args.format, None);
        } else {
            panic!("Expected Tokens command");
        }
    }

    #[test]
    fn test_cli_parse_tokens_with_format() {
        let cli = Cli::parse_from(["serpt", "tokens", "a.py", "b.py", "--format", "json", "--visible"]);
        if let Commands::Tokens(args) = cli.command {
            assert_eq!(args.files.len(), 2);
            assert!(args.visible);
            assert_eq!(args.format, Some(OutputFormat::Json));
        } else {
            panic!("Expected Tokens command");
        }
    }

    #[test]
    fn test_cli_tokens_requires_files() {
        assert!(Cli::try_parse_from(["serpt", "tokens"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["serpt", "tokens", "a.py", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["serpt", "check", "a.py"]);
        if let Commands::Check(args) = cli.command {
            assert!(!args.no_recover);
            assert!(!args.no_roundtrip);
            assert_eq!(args.max_errors, None);
            assert_eq!(args.jobs, None);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_check_with_flags() {
        let cli = Cli::parse_from([
            "serpt",
            "check",
            "a.py",
            "--no-recover",
            "--no-roundtrip",
            "--max-errors",
            "3",
            "--jobs",
            "2",
        ]);
        if let Commands::Check(args) = cli.command {
            assert!(args.no_recover);
            assert!(args.no_roundtrip);
            assert_eq!(args.max_errors, Some(3));
            assert_eq!(args.jobs, Some(2));
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_check_rejects_zero_jobs() {
        assert!(Cli::try_parse_from(["serpt", "check", "a.py", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_write() {
        let cli = Cli::parse_from(["serpt", "config", "--write", "/tmp/serpt.toml"]);
        if let Commands::Config(args) = cli.command {
            assert_eq!(args.write, Some(PathBuf::from("/tmp/serpt.toml")));
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["serpt", "--verbose", "config"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from(["serpt", "--config", "/path/to/serpt.toml", "config"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/serpt.toml")));
    }

    #[test]
    fn test_cli_parse_global_no_color() {
        let cli = Cli::parse_from(["serpt", "check", "a.py", "--no-color"]);
        assert!(cli.no_color);
    }
}
