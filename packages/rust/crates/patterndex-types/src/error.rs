//! Error types for corpus loading and validation.
//!
//! Structural problems in the corpus are never errors: they are `Finding`s.
//! This enum only carries conditions that abort a run (exit code 2).

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Failure modes that abort a corpus run.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The corpus root does not exist or is not a directory.
    #[error("corpus root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Low-level I/O error, tagged with the offending path.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File or directory that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A Markdown file is not valid UTF-8.
    #[error("file is not valid UTF-8: {}", .0.display())]
    Encoding(PathBuf),

    /// A configuration file exists but cannot be used.
    #[error("invalid configuration in {}: {message}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Parser or validation message.
        message: String,
    },

    /// The cooperative stop signal was raised before the run finished.
    #[error("validation cancelled")]
    Cancelled,
}

impl CorpusError {
    /// Wrap an `std::io::Error` with its path, mapping invalid UTF-8 to `Encoding`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::InvalidData {
            return Self::Encoding(path);
        }
        Self::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_maps_to_encoding() {
        let err = CorpusError::io(
            "cloud/cache.md",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        );
        assert!(matches!(err, CorpusError::Encoding(_)));
        assert_eq!(err.to_string(), "file is not valid UTF-8: cloud/cache.md");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = CorpusError::io(
            "README.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("failed to read README.md"));
    }
}
