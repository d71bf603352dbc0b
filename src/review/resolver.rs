//! Resolution of `--rrev` specifications into an ordered changeset list.

use std::collections::HashSet;

use crate::vcs::{Changeset, ChangesetId, VcsError, VersionControl};

use super::error::ReviewError;
use super::spec::RevisionSpec;

/// Turns revision specifications into the changesets a review covers.
#[derive(Debug, Clone, Copy)]
pub struct ChangesetResolver<'a> {
    vcs: &'a dyn VersionControl,
}

impl<'a> ChangesetResolver<'a> {
    /// Creates a resolver over the given changeset graph.
    #[must_use]
    pub const fn new(vcs: &'a dyn VersionControl) -> Self {
        Self { vcs }
    }

    /// Resolves `specs` into a deduplicated list in first-seen order.
    ///
    /// Without specs, the review covers only the most recent changeset in
    /// `pushed` (the outgoing changesets, oldest first).
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NothingToReview`] when no specs are given and
    /// nothing was pushed, [`ReviewError::InvalidRange`] or
    /// [`ReviewError::UnknownRevision`] for a spec that cannot be resolved,
    /// and [`ReviewError::Repository`] when the graph query itself fails.
    pub fn resolve(
        &self,
        specs: &[RevisionSpec],
        pushed: &[Changeset],
    ) -> Result<Vec<Changeset>, ReviewError> {
        if specs.is_empty() {
            let tip = pushed.last().ok_or(ReviewError::NothingToReview)?;
            tracing::debug!(
                "reviewing the latest pushed changeset {} (committed {})",
                tip.id().short(),
                tip.timestamp()
            );
            return Ok(vec![tip.clone()]);
        }

        let mut resolved = Vec::new();
        for spec in specs {
            resolved.extend(self.resolve_spec(spec)?);
        }

        let unique = dedup_changesets(resolved);
        tracing::debug!(
            "resolved {} spec(s) to {} changeset(s)",
            specs.len(),
            unique.len()
        );
        Ok(unique)
    }

    fn resolve_spec(&self, spec: &RevisionSpec) -> Result<Vec<Changeset>, ReviewError> {
        match spec {
            RevisionSpec::Single(revision) => Ok(vec![self.lookup(spec, revision)?]),
            RevisionSpec::Range { from, to } => {
                let start = self.lookup(spec, from)?;
                let end = self.lookup(spec, to)?;
                self.path_between(spec, start.id(), end.id())
            }
        }
    }

    fn path_between(
        &self,
        spec: &RevisionSpec,
        start: &ChangesetId,
        end: &ChangesetId,
    ) -> Result<Vec<Changeset>, ReviewError> {
        let path = self
            .vcs
            .ancestry_path(start, end)
            .map_err(|error| repository_error(&error))?;

        path.ok_or_else(|| ReviewError::InvalidRange {
            spec: spec.to_string(),
            reason: format!(
                "{} is not a descendant of {}",
                end.short(),
                start.short()
            ),
        })
    }

    fn lookup(&self, spec: &RevisionSpec, revision: &str) -> Result<Changeset, ReviewError> {
        self.vcs.changeset(revision).map_err(|error| match error {
            VcsError::RevisionNotFound { .. } => ReviewError::UnknownRevision {
                spec: spec.to_string(),
            },
            other => repository_error(&other),
        })
    }
}

/// Removes repeated changesets, keeping each one's first occurrence.
#[must_use]
pub fn dedup_changesets(changesets: impl IntoIterator<Item = Changeset>) -> Vec<Changeset> {
    let mut seen = HashSet::new();
    changesets
        .into_iter()
        .filter(|changeset| seen.insert(changeset.id().clone()))
        .collect()
}

fn repository_error(error: &VcsError) -> ReviewError {
    ReviewError::Repository {
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
