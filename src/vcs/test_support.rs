//! In-memory collaborators for unit and behavioural tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use super::{
    Changeset, ChangesetId, PushOperation, PushStatus, PushedRefs, VcsError, VersionControl,
};

/// A changeset graph held in memory.
///
/// Changesets must be added parents first; insertion order doubles as the
/// topological order of the history.
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    order: Vec<Changeset>,
    parents: HashMap<ChangesetId, Vec<ChangesetId>>,
    outgoing: Vec<ChangesetId>,
    remotes: Vec<(String, String)>,
    branches: HashMap<String, ChangesetId>,
}

impl InMemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a single-line history from `(id, description)` pairs, oldest
    /// first.
    #[must_use]
    pub fn linear(changesets: &[(&str, &str)]) -> Self {
        let mut graph = Self::new();
        let mut previous: Option<&str> = None;
        for (id, description) in changesets {
            let parents: Vec<&str> = previous.into_iter().collect();
            graph = graph.with_changeset(id, description, &parents);
            previous = Some(*id);
        }
        graph
    }

    /// Adds a changeset with the given parents.
    #[must_use]
    pub fn with_changeset(mut self, id: &str, description: &str, parents: &[&str]) -> Self {
        let changeset_id = ChangesetId::from(id);
        self.parents.insert(
            changeset_id.clone(),
            parents.iter().copied().map(ChangesetId::from).collect(),
        );
        self.order
            .push(Changeset::new(changeset_id, description, DateTime::<Utc>::default()));
        self
    }

    /// Marks changesets as outgoing, oldest first.
    #[must_use]
    pub fn with_outgoing(mut self, ids: &[&str]) -> Self {
        self.outgoing = ids.iter().copied().map(ChangesetId::from).collect();
        self
    }

    /// Names a branch whose tip is `tip`, so refspecs can refer to it.
    #[must_use]
    pub fn with_branch(mut self, name: &str, tip: &str) -> Self {
        self.branches.insert(name.to_owned(), ChangesetId::from(tip));
        self
    }

    /// Adds a remote; the first remote added is the default push remote.
    #[must_use]
    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.push((name.to_owned(), url.to_owned()));
        self
    }

    fn find(&self, id: &ChangesetId) -> Option<&Changeset> {
        self.order.iter().find(|changeset| changeset.id() == id)
    }

    fn is_ancestor(&self, ancestor: &ChangesetId, descendant: &ChangesetId) -> bool {
        let mut pending = vec![descendant.clone()];
        while let Some(current) = pending.pop() {
            if &current == ancestor {
                return true;
            }
            if let Some(parents) = self.parents.get(&current) {
                pending.extend(parents.iter().cloned());
            }
        }
        false
    }

    fn remote_url(&self, name: &str) -> Option<&str> {
        self.remotes
            .iter()
            .find(|(remote, _)| remote == name)
            .map(|(_, url)| url.as_str())
    }

    fn resolve_source(&self, source: &str) -> Result<ChangesetId, VcsError> {
        match self.branches.get(source) {
            Some(tip) => Ok(tip.clone()),
            None => self.changeset(source).map(|found| found.id().clone()),
        }
    }

    fn knows_destination(&self, destination: &str) -> bool {
        self.remotes.iter().any(|(name, url)| {
            name == destination || url.eq_ignore_ascii_case(destination)
        })
    }
}

impl VersionControl for InMemoryGraph {
    fn changeset(&self, revision: &str) -> Result<Changeset, VcsError> {
        let mut matches = self
            .order
            .iter()
            .filter(|changeset| changeset.id().as_str().starts_with(revision));
        match (matches.next(), matches.next()) {
            (Some(found), None) if !revision.is_empty() => Ok(found.clone()),
            _ => Err(VcsError::RevisionNotFound {
                revision: revision.to_owned(),
            }),
        }
    }

    fn ancestry_path(
        &self,
        from: &ChangesetId,
        to: &ChangesetId,
    ) -> Result<Option<Vec<Changeset>>, VcsError> {
        if !self.is_ancestor(from, to) {
            return Ok(None);
        }

        let path = self
            .order
            .iter()
            .filter(|changeset| {
                let id = changeset.id();
                self.is_ancestor(from, id) && self.is_ancestor(id, to)
            })
            .cloned()
            .collect();
        Ok(Some(path))
    }

    /// Outgoing changesets are the ones marked with
    /// [`InMemoryGraph::with_outgoing`]; refspecs narrow them to the
    /// ancestors of their sources.
    fn outgoing(
        &self,
        destination: Option<&str>,
        refs: &PushedRefs,
    ) -> Result<Vec<Changeset>, VcsError> {
        if destination.is_some_and(|target| !self.knows_destination(target)) {
            return Ok(Vec::new());
        }

        let tips = match refs {
            PushedRefs::Head | PushedRefs::AllBranches => None,
            PushedRefs::Refspecs(_) => Some(
                refs.sources()
                    .into_iter()
                    .map(|source| self.resolve_source(source))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(self
            .outgoing
            .iter()
            .filter(|id| {
                tips.as_ref()
                    .is_none_or(|tips| tips.iter().any(|tip| self.is_ancestor(id, tip)))
            })
            .filter_map(|id| self.find(id).cloned())
            .collect())
    }

    fn destination_url(&self, destination: Option<&str>) -> Result<Option<String>, VcsError> {
        let resolved = match destination {
            Some(target) => self.remote_url(target).or(Some(target)),
            None => self.remotes.first().map(|(_, url)| url.as_str()),
        };
        Ok(resolved.map(ToOwned::to_owned))
    }
}

/// Push stub that records its arguments and returns a canned outcome.
#[derive(Debug)]
pub struct RecordingPush {
    outcome: Result<PushStatus, VcsError>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingPush {
    /// A push that succeeds.
    #[must_use]
    pub const fn succeeding() -> Self {
        Self::with_outcome(Ok(PushStatus::Succeeded))
    }

    /// A push that runs and exits with `code`.
    #[must_use]
    pub const fn failing(code: i32) -> Self {
        Self::with_outcome(Ok(PushStatus::Failed { code }))
    }

    /// A push whose process cannot be started.
    #[must_use]
    pub fn unlaunchable(message: impl Into<String>) -> Self {
        Self::with_outcome(Err(VcsError::PushLaunch {
            message: message.into(),
        }))
    }

    const fn with_outcome(outcome: Result<PushStatus, VcsError>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the argument lists of every push performed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PushOperation for RecordingPush {
    fn push(&self, args: &[String]) -> Result<PushStatus, VcsError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.to_vec());
        self.outcome.clone()
    }
}
