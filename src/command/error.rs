//! Errors that stop the command before the push runs.

use thiserror::Error;

use crate::vcs::VcsError;

/// Failures detected before (or while launching) the push.
///
/// Every variant means the push was not performed; the binary exits with
/// status 1.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// A review flag was misused.
    #[error("{message}")]
    Usage {
        /// The parser's description of the problem.
        message: String,
    },

    /// `--help` or `--version` was requested; the text goes to stdout.
    #[error("{text}")]
    HelpRequested {
        /// Rendered help or version text.
        text: String,
    },

    /// No `--rr` reviewer was given and review was not bypassed.
    #[error("at least one reviewer is required: pass --rr <name> (or --rr none to push without a review)")]
    MissingReviewers,

    /// A `--rrev` value is neither a revision nor a `FROM:TO` range.
    #[error("malformed revision '{value}': expected REV or FROM:TO")]
    MalformedSpec {
        /// The offending value.
        value: String,
    },

    /// The loaded configuration is invalid.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// What was wrong with it.
        message: String,
    },

    /// The repository could not be opened.
    #[error("repository error: {message}")]
    Repository {
        /// Error detail from the version-control adapter.
        message: String,
    },

    /// The push process could not be started.
    #[error("failed to run git push: {message}")]
    PushLaunch {
        /// Error detail from the process launcher.
        message: String,
    },
}

impl From<VcsError> for CommandError {
    fn from(error: VcsError) -> Self {
        match error {
            VcsError::PushLaunch { message } => Self::PushLaunch { message },
            other => Self::Repository {
                message: other.to_string(),
            },
        }
    }
}
