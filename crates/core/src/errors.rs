//! Error types and handling
//!
//! The taxonomy mirrors the three outcomes an output facility can produce:
//! bad input to a core operation (`ValidationError`), a spawned command that
//! failed (`ExecutionError`), and problems loading theme configuration
//! (`ConfigError`). Recoverable stderr noise is not an error at all; it is
//! reported as a warning by the command runner and never surfaces here.
//! Everything is wrapped in `TermkitError` for unified handling.

use thiserror::Error;

/// Invalid argument passed to a core operation.
///
/// Always raised synchronously, before any output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A value outside of its allowed domain
    #[error("Invalid value for `{field}`: expected {expected}, got {received}")]
    InvalidValue {
        field: String,
        expected: String,
        received: String,
    },

    /// A required value that was empty
    #[error("Missing required value for `{field}`")]
    Missing { field: String },
}

impl ValidationError {
    pub fn invalid(
        field: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            expected: expected.into(),
            received: received.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidValue { field, .. } | Self::Missing { field } => field,
        }
    }
}

/// Spawned command failures
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The shell could not be started
    #[error("Failed to spawn command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command exited with a non-zero status
    #[error("Command failed with exit code {code}: {command}")]
    ExitStatus { command: String, code: i32 },

    /// Command was terminated without an exit code (signal)
    #[error("Command was terminated by a signal: {command}")]
    Terminated { command: String },
}

impl ExecutionError {
    /// Exit code reported by the command, when there is one
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::ExitStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Theme configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Theme file could not be read
    #[error("Failed to read theme file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid TOML or has wrongly typed fields
    #[error("Failed to parse theme file {path}: {message}")]
    Parsing { path: String, message: String },

    /// Environment variable holds a value of the wrong type
    #[error("Invalid value in environment variable {name}: {message}")]
    Environment { name: String, message: String },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum TermkitError {
    /// Invalid argument
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Command execution failure
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Configuration loading failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing to the output sink failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with TermkitError
pub type Result<T> = std::result::Result<T, TermkitError>;
