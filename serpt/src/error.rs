//! Error handling module for the serpt CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use serpent_lex::LexError;
use serpent_util::SourceMapError;
use thiserror::Error;

/// Main error type for the serpt CLI application.
#[derive(Error, Debug)]
pub enum SerptError {
    /// Error when the configuration cannot be found or read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when a source file cannot be read.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error when checked sources contain lexical errors.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when a command cannot be carried out.
    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    /// Error when a file fails to lex.
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    /// Error when a file id has no entry in the source map.
    #[error("Source map error: {0}")]
    SourceMap(#[from] SourceMapError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when a configuration file is not valid TOML.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Error when the configuration cannot be written as TOML.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias using SerptError.
pub type Result<T> = std::result::Result<T, SerptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serpent_util::Span;

    #[test]
    fn test_config_error_display() {
        let err = SerptError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_file_operation_error_display() {
        let err = SerptError::FileOperation("permission denied".to_string());
        assert_eq!(err.to_string(), "File operation failed: permission denied");
    }

    #[test]
    fn test_validation_error_display() {
        let err = SerptError::Validation("2 file(s) with lexical errors".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: 2 file(s) with lexical errors"
        );
    }

    #[test]
    fn test_command_execution_error_display() {
        let err = SerptError::CommandExecution("thread pool".to_string());
        assert_eq!(err.to_string(), "Command execution failed: thread pool");
    }

    #[test]
    fn test_lex_error_conversion() {
        let lex_err = LexError::UnrecognizedCharacter {
            ch: '$',
            span: Span::new(0, 1, 1, 0),
        };
        let err: SerptError = lex_err.into();
        assert!(matches!(err, SerptError::Lex(_)));
        assert_eq!(err.to_string(), "Lexical error: unrecognized character '$' at 1:0");
    }

    #[test]
    fn test_source_map_error_conversion() {
        let err: SerptError = SourceMapError::FileNotFound("FileId(3)".to_string()).into();
        assert!(matches!(err, SerptError::SourceMap(_)));
        assert_eq!(err.to_string(), "Source map error: File not found: FileId(3)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SerptError = io_err.into();
        assert!(matches!(err, SerptError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: SerptError = json_err.into();
        assert!(matches!(err, SerptError::Json(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: SerptError = toml_err.into();
        assert!(matches!(err, SerptError::TomlParse(_)));
    }
}
