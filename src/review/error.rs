//! Errors raised by the review pipeline after a successful push.
//!
//! None of these alter the push's exit status: the interceptor reports them
//! as warnings (or, for [`ReviewError::NothingToReview`], as a notice).

use thiserror::Error;

/// Failures and no-op conditions of the review-creation pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// A `FROM:TO` range whose end does not descend from its start.
    #[error("invalid revision range '{spec}': {reason}")]
    InvalidRange {
        /// The offending range as the user wrote it.
        spec: String,
        /// Why the range has no linear path.
        reason: String,
    },

    /// A revision that names no changeset in the repository.
    #[error("unknown revision '{spec}'")]
    UnknownRevision {
        /// The offending revision as the user wrote it.
        spec: String,
    },

    /// The push transmitted no changesets and none were named explicitly.
    #[error("no outgoing changesets to review (use --rrev to name changesets explicitly)")]
    NothingToReview,

    /// The editor session did not produce a comment.
    #[error("comment editing aborted ({reason}); creating the review without a comment")]
    EditAborted {
        /// What ended the editor session.
        reason: String,
    },

    /// The push destination has no review-service repository.
    #[error("no review repository is configured for push destination '{destination}'")]
    UnresolvedTarget {
        /// The push destination (remote alias or URL).
        destination: String,
    },

    /// No credentials are stored for the review service.
    #[error("no credentials stored for {prefix}; set username and password in .pushreview.toml")]
    NoCredentials {
        /// The service URL prefix the credentials were requested for.
        prefix: String,
    },

    /// The review service rejected the stored credentials.
    #[error("review service rejected the credentials ({message}); check the stored username and password")]
    Authentication {
        /// Status and body detail returned by the service.
        message: String,
    },

    /// The review service could not be reached.
    #[error("could not reach the review service: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// The review service answered with something unexpected.
    #[error("unexpected response from the review service: {message}")]
    Protocol {
        /// Status and body detail returned by the service.
        message: String,
    },

    /// The changeset graph could not be queried.
    #[error("repository query failed: {message}")]
    Repository {
        /// Error detail from the version-control adapter.
        message: String,
    },
}

impl ReviewError {
    /// Returns true for conditions that are reported as notices rather than
    /// warnings.
    #[must_use]
    pub const fn is_no_op(&self) -> bool {
        matches!(self, Self::NothingToReview)
    }
}
