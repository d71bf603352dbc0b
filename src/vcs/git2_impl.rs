//! Git2-based implementation of `VersionControl`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{TimeZone, Utc};
use git2::{Commit, Oid, Repository, Sort};

use super::VersionControl;
use super::error::VcsError;
use super::types::{Changeset, ChangesetId, PushedRefs};

/// Remote used when neither the command line nor Git configuration names one.
const DEFAULT_REMOTE_NAME: &str = "origin";

/// Git2-based implementation of `VersionControl`.
///
/// Uses a `Mutex` to wrap the `Repository` because `git2::Repository` is not
/// `Sync`.
pub struct Git2Repository {
    repo: Mutex<Repository>,
}

impl std::fmt::Debug for Git2Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Repository")
            .field("repo", &"<git2::Repository>")
            .finish()
    }
}

impl Git2Repository {
    fn from_repo_result(result: Result<Repository, git2::Error>) -> Result<Self, VcsError> {
        let repo = result.map_err(|e| VcsError::NotARepository {
            message: e.message().to_owned(),
        })?;
        Ok(Self {
            repo: Mutex::new(repo),
        })
    }

    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(repo_path: &Path) -> Result<Self, VcsError> {
        Self::from_repo_result(Repository::open(repo_path))
    }

    /// Discovers and opens a repository containing the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if no Git repository is found.
    pub fn discover(start_path: &Path) -> Result<Self, VcsError> {
        Self::from_repo_result(Repository::discover(start_path))
    }

    /// Returns the working directory, if the repository is not bare.
    #[must_use]
    pub fn workdir(&self) -> Option<PathBuf> {
        self.repository().workdir().map(Path::to_path_buf)
    }

    fn repository(&self) -> MutexGuard<'_, Repository> {
        // A poisoned lock still guards a usable handle; every query is read-only.
        self.repo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VersionControl for Git2Repository {
    fn changeset(&self, revision: &str) -> Result<Changeset, VcsError> {
        let repo = self.repository();
        let commit = find_commit_by_revision(&repo, revision)?;
        Ok(to_changeset(&commit))
    }

    fn ancestry_path(
        &self,
        from: &ChangesetId,
        to: &ChangesetId,
    ) -> Result<Option<Vec<Changeset>>, VcsError> {
        let repo = self.repository();
        let from_commit = find_commit_by_revision(&repo, from.as_str())?;
        let to_commit = find_commit_by_revision(&repo, to.as_str())?;
        let from_oid = from_commit.id();
        let to_oid = to_commit.id();

        if from_oid == to_oid {
            return Ok(Some(vec![to_changeset(&from_commit)]));
        }

        if !repo.graph_descendant_of(to_oid, from_oid)? {
            return Ok(None);
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;

        let mut path = vec![to_changeset(&from_commit)];
        for step in revwalk {
            let oid = step?;
            // Side branches merged into `to` are reachable but not on the path.
            if oid == to_oid || repo.graph_descendant_of(oid, from_oid)? {
                path.push(to_changeset(&repo.find_commit(oid)?));
            }
        }

        Ok(Some(path))
    }

    fn outgoing(
        &self,
        destination: Option<&str>,
        refs: &PushedRefs,
    ) -> Result<Vec<Changeset>, VcsError> {
        let repo = self.repository();
        let Some(remote_name) = remote_name_for(&repo, destination)? else {
            tracing::debug!(
                "push destination {destination:?} is not a configured remote; \
                 outgoing changesets are unknown"
            );
            return Ok(Vec::new());
        };

        let mut revwalk = repo.revwalk()?;
        match refs {
            PushedRefs::Head => revwalk.push(repo.head()?.peel_to_commit()?.id())?,
            PushedRefs::AllBranches => revwalk.push_glob("refs/heads/*")?,
            PushedRefs::Refspecs(_) => {
                let sources = refs.sources();
                if sources.is_empty() {
                    tracing::debug!("push only deletes refs; nothing is outgoing");
                    return Ok(Vec::new());
                }
                for source in sources {
                    if source.contains('*') {
                        revwalk.push_glob(source)?;
                    } else {
                        revwalk.push(find_commit_by_revision(&repo, source)?.id())?;
                    }
                }
            }
        }

        for reference in repo.references_glob(&format!("refs/remotes/{remote_name}/*"))? {
            if let Some(target) = reference?.target() {
                revwalk.hide(target)?;
            }
        }
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;

        let mut outgoing = Vec::new();
        for step in revwalk {
            outgoing.push(to_changeset(&repo.find_commit(step?)?));
        }

        tracing::debug!(
            "{} outgoing changeset(s) for remote '{remote_name}'",
            outgoing.len()
        );
        Ok(outgoing)
    }

    fn destination_url(&self, destination: Option<&str>) -> Result<Option<String>, VcsError> {
        let repo = self.repository();
        let remote_name = match destination {
            Some(name) => name.to_owned(),
            None => default_remote_name(&repo),
        };

        if let Ok(remote) = repo.find_remote(&remote_name) {
            let url = remote.pushurl().or_else(|| remote.url()).map(ToOwned::to_owned);
            return Ok(url);
        }

        // Anything that is not a remote alias is taken to be a URL already.
        Ok(destination.map(ToOwned::to_owned))
    }
}

fn find_commit_by_revision<'repo>(
    repo: &'repo Repository,
    revision: &str,
) -> Result<Commit<'repo>, VcsError> {
    let not_found = || VcsError::RevisionNotFound {
        revision: revision.to_owned(),
    };

    if let Ok(oid) = Oid::from_str(revision)
        && let Ok(commit) = repo.find_commit(oid)
    {
        return Ok(commit);
    }

    repo.revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map_err(|_| not_found())
}

fn to_changeset(commit: &Commit<'_>) -> Changeset {
    let description = commit.message().unwrap_or("").trim().to_owned();
    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_default();

    Changeset::new(commit.id().to_string(), description, timestamp)
}

/// Resolves the remote a push to `destination` talks to.
///
/// Returns `None` when `destination` is a URL that no configured remote uses.
fn remote_name_for(
    repo: &Repository,
    destination: Option<&str>,
) -> Result<Option<String>, VcsError> {
    let Some(target) = destination else {
        return Ok(Some(default_remote_name(repo)));
    };

    if repo.find_remote(target).is_ok() {
        return Ok(Some(target.to_owned()));
    }

    let remotes = repo.remotes()?;
    for name in remotes.iter().flatten() {
        let remote = repo.find_remote(name)?;
        let matches = [remote.url(), remote.pushurl()]
            .into_iter()
            .flatten()
            .any(|url| url.eq_ignore_ascii_case(target));
        if matches {
            return Ok(Some(name.to_owned()));
        }
    }

    Ok(None)
}

/// Mirrors `git push` without arguments: `remote.pushDefault`, then the
/// current branch's remote, then `origin`.
fn default_remote_name(repo: &Repository) -> String {
    let Ok(config) = repo.config() else {
        return DEFAULT_REMOTE_NAME.to_owned();
    };

    if let Ok(name) = config.get_string("remote.pushDefault") {
        return name;
    }

    repo.head()
        .ok()
        .filter(git2::Reference::is_branch)
        .and_then(|head| head.shorthand().map(ToOwned::to_owned))
        .and_then(|branch| config.get_string(&format!("branch.{branch}.remote")).ok())
        .unwrap_or_else(|| DEFAULT_REMOTE_NAME.to_owned())
}
