//! Error types for ADCIRC file parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for ADCIRC parser operations.
pub type AdcircResult<T> = Result<T, AdcircError>;

/// Error types for ADCIRC parsing.
#[derive(Error, Debug)]
pub enum AdcircError {
    /// File could not be opened or read
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed content at a specific (1-based) line
    #[error("Invalid format at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Field values that do not match the requested shape
    #[error("Invalid field shape: {0}")]
    Shape(String),

    /// Reader options that can never produce a meaningful result
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Options text that does not deserialize
    #[error("Failed to parse options: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AdcircError {
    /// Create an I/O error tagged with the path being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Format error for the given line.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a Format error for input that ended before `expected` was read.
    pub fn truncated(line: usize, expected: &str) -> Self {
        Self::format(line, format!("expected {}, found end of file", expected))
    }

    /// Line number for Format errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether this is a Format error.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
