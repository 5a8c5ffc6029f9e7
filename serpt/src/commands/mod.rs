//! Command modules for the serpt CLI.
//!
//! Each subcommand is implemented in its own file following the same
//! pattern: an `*Args` struct, a command type implementing
//! [`traits::Command`], and a `run_*` entry point.

pub mod common;
pub mod traits;

pub mod check;
pub mod config;
pub mod tokens;

// Re-export command types and functions
pub use check::{run_check, CheckArgs};
pub use config::{run_config, ConfigArgs};
pub use tokens::{run_tokens, TokensArgs};
