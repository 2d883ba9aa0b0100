//! Error types for slangshift library.

use std::io;
use thiserror::Error;

/// Result type alias for slangshift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for slangshift library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required dataset column is missing.
    #[error("Expected columns '{expected}' not found. Available columns: [{available}]")]
    MissingColumn { expected: String, available: String },

    /// Input text was empty after trimming.
    #[error("Please enter some text")]
    EmptyInput,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The translation model could not be loaded.
    #[error("Model not available: {0}")]
    ModelUnavailable(String),

    /// The model was loaded but generation failed.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// HTTP transport error talking to a hosted model.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl Error {
    /// Returns true if the error was caused by the caller's input rather
    /// than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::MissingColumn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::EmptyInput.is_client_error());
        assert!(Error::MissingColumn {
            expected: "formal_text".into(),
            available: "'a'".into(),
        }
        .is_client_error());
        assert!(!Error::ModelUnavailable("oom".into()).is_client_error());
        assert!(!Error::Generation("empty".into()).is_client_error());
    }

    #[test]
    fn test_csv_error_converts() {
        let err: Error = csv::Reader::from_reader("a,b\n1,2,3\n".as_bytes())
            .records()
            .find_map(|r| r.err())
            .map(Error::from)
            .unwrap();
        assert!(matches!(err, Error::Csv(_)));
    }
}
