//! Version-control collaborators used by the push interceptor.
//!
//! The review pipeline never owns the changeset graph: it queries it through
//! [`VersionControl`] and delegates the push itself to [`PushOperation`].
//! Both traits exist so tests can substitute in-memory implementations for
//! the git2-backed repository and the `git push` subprocess.

mod error;
mod git2_impl;
mod push;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::fmt::Debug;

pub use error::VcsError;
pub use git2_impl::Git2Repository;
pub use push::GitCliPush;
pub use types::{Changeset, ChangesetId, PushStatus, PushedRefs};

/// Read-only queries against the repository's changeset graph.
pub trait VersionControl: Send + Sync + Debug {
    /// Resolves a single revision (hash, abbreviated hash, or ref name).
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::RevisionNotFound`] when the revision does not name
    /// a changeset.
    fn changeset(&self, revision: &str) -> Result<Changeset, VcsError>;

    /// Returns every changeset on the ancestry path from `from` to `to`,
    /// both inclusive, oldest first.
    ///
    /// Returns `Ok(None)` when `to` is neither `from` nor a descendant of it.
    ///
    /// # Errors
    ///
    /// Returns an error when the graph cannot be walked.
    fn ancestry_path(
        &self,
        from: &ChangesetId,
        to: &ChangesetId,
    ) -> Result<Option<Vec<Changeset>>, VcsError>;

    /// Lists the changesets a push of `refs` to `destination` would
    /// transmit, oldest first.
    ///
    /// `None` selects the default push remote.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::RevisionNotFound`] when a refspec source names no
    /// changeset, and an error when the repository head or remote refs
    /// cannot be read.
    fn outgoing(
        &self,
        destination: Option<&str>,
        refs: &PushedRefs,
    ) -> Result<Vec<Changeset>, VcsError>;

    /// Maps a push destination (remote alias or URL) to the URL it pushes to.
    ///
    /// Returns `Ok(None)` when no destination is given and no default remote
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository configuration cannot be read.
    fn destination_url(&self, destination: Option<&str>) -> Result<Option<String>, VcsError>;
}

/// The push the interceptor wraps.
pub trait PushOperation: Send + Sync + Debug {
    /// Runs the push with the caller's pass-through arguments.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::PushLaunch`] when the push could not be started at
    /// all. A push that runs and fails is reported as
    /// [`PushStatus::Failed`].
    fn push(&self, args: &[String]) -> Result<PushStatus, VcsError>;
}
