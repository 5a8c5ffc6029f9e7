//! Common types and utilities for serpt commands.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SerptError};

// ============================================================================
// Output Format
// ============================================================================

/// How token listings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per token
    #[default]
    Text,
    /// One JSON object per token
    Json,
}

// ============================================================================
// Source Input
// ============================================================================

/// Read a source file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        SerptError::FileOperation(format!(
            "{} {}: {}",
            error_messages::CANNOT_READ,
            path.display(),
            e
        ))
    })
}

/// Name used for `path` in listings and diagnostics.
pub fn display_name(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Error Messages
// ============================================================================

/// Standard error message templates.
pub mod error_messages {
    /// Prefix when a source file cannot be read.
    pub const CANNOT_READ: &str = "Cannot read";

    /// Error when no input files are specified.
    pub const NO_INPUT_FILES: &str = "No input files specified";

    /// Error when the job count is zero.
    pub const ZERO_JOBS: &str = "Number of jobs must be at least 1";
}
