//! Error types for tempex.

use thiserror::Error;

/// Result type for tempex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tempex operations.
///
/// Malformed date fragments never show up here: the lexical matcher drops
/// them silently. What does surface is configuration trouble (caught when a
/// signal table is loaded) and a failing linguistic provider.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The linguistic annotation provider is unavailable or failed.
    ///
    /// Only signal and ordinal matching depend on it; date matching still
    /// works through [`crate::annotate_dates`].
    #[error("Linguistic provider error: {0}")]
    Linguistic(String),

    /// A malformed signal keyword table entry.
    #[error("Signal table error (line {line}): {message}")]
    SignalTable {
        /// 1-based line (or entry) number
        line: usize,
        /// What is wrong with it
        message: String,
    },

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from a core value type.
    #[error(transparent)]
    Core(#[from] tempex_core::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a linguistic provider error.
    pub fn linguistic(msg: impl Into<String>) -> Self {
        Error::Linguistic(msg.into())
    }

    /// Create a signal table error for the given 1-based line.
    pub fn signal_table(line: usize, msg: impl Into<String>) -> Self {
        Error::SignalTable {
            line,
            message: msg.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// True for failures of the linguistic provider.
    #[must_use]
    pub fn is_linguistic(&self) -> bool {
        matches!(self, Error::Linguistic(_))
    }
}
