//! Authoring error types.

use std::path::PathBuf;

use patterndex_types::{CorpusError, SlugError};
use thiserror::Error;

/// Result alias for authoring operations.
pub type AuthoringResult<T> = Result<T, AuthoringError>;

/// Why a scaffold or index write was refused or failed.
#[derive(Error, Debug)]
pub enum AuthoringError {
    /// The destination already exists; authoring never overwrites.
    #[error("refusing to overwrite existing file {}", .0.display())]
    TargetExists(PathBuf),

    /// A name does not yield a usable slug.
    #[error("invalid name '{name}': {source}")]
    InvalidName {
        /// Name as given.
        name: String,
        /// Slug validation failure.
        #[source]
        source: SlugError,
    },

    /// The category folder does not exist.
    #[error("unknown category '{category}' (no folder {})", folder.display())]
    UnknownCategory {
        /// Category as given.
        category: String,
        /// Folder that was expected.
        folder: PathBuf,
    },

    /// A generated block has no markers to replace.
    #[error("{} has no '{marker}' marker", path.display())]
    MissingMarker {
        /// File searched.
        path: PathBuf,
        /// Marker that was not found.
        marker: String,
    },

    /// Filesystem failure, tagged with the offending path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Loading the corpus failed.
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl AuthoringError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
