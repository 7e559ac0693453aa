//! Error types for PDF form field extraction

use thiserror::Error;

/// Result type alias for form field extraction
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for form field extraction
///
/// Only whole-run failures are represented here. A single malformed
/// annotation never produces an error; it is normalized with defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// Input path does not exist or cannot be read
    #[error("PDF not found: {path}")]
    InputNotFound { path: String },

    /// Input could not be opened or parsed as a PDF document
    #[error("Invalid PDF file: {reason}")]
    SourceParse { reason: String },

    /// Batch input is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// Filename filter is not a valid glob pattern
    #[error("Invalid pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputNotFound { .. } => 2,
            Error::SourceParse { .. } => 3,
            Error::NotADirectory { .. }
            | Error::InvalidPattern { .. }
            | Error::Io(_)
            | Error::Serialization(_) => 1,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::SourceParse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_found = Error::InputNotFound {
            path: "missing.pdf".to_string(),
        };
        assert_eq!(not_found.exit_code(), 2);

        let parse = Error::SourceParse {
            reason: "bad xref".to_string(),
        };
        assert_eq!(parse.exit_code(), 3);

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InputNotFound {
            path: "/tmp/form.pdf".to_string(),
        };
        assert_eq!(err.to_string(), "PDF not found: /tmp/form.pdf");

        let err = Error::InvalidPattern {
            pattern: "[".to_string(),
            reason: "unclosed".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid pattern [: unclosed");
    }
}
