//! Error types for version-control queries and push execution.

use thiserror::Error;

/// Errors raised by the version-control adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VcsError {
    /// The working directory is not inside a Git repository.
    #[error("not inside a Git repository: {message}")]
    NotARepository {
        /// Error detail from the git2 library.
        message: String,
    },

    /// A revision could not be resolved to a changeset.
    #[error("revision '{revision}' not found")]
    RevisionNotFound {
        /// The revision text that failed to resolve.
        revision: String,
    },

    /// The push command could not be started.
    #[error("failed to launch git push: {message}")]
    PushLaunch {
        /// Error detail from the operating system.
        message: String,
    },

    /// Any other Git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for VcsError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}
