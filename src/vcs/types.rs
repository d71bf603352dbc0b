//! Domain types for changesets and push outcomes.
//!
//! These newtypes keep raw Git strings from leaking through the review
//! pipeline and make the resolver and payload APIs self-documenting.

use std::fmt;

use chrono::{DateTime, Utc};

/// Number of hex digits shown when a changeset is displayed to the user.
const SHORT_ID_LEN: usize = 12;

/// A full hexadecimal changeset identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangesetId(String);

impl ChangesetId {
    /// Creates a new `ChangesetId` from a string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated form used in user-facing messages.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..SHORT_ID_LEN).unwrap_or(&self.0)
    }
}

impl fmt::Display for ChangesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChangesetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ChangesetId {
    fn from(s: &str) -> Self {
        Self::new(s.to_owned())
    }
}

impl AsRef<str> for ChangesetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A read-only view of one changeset in the repository history.
///
/// The timestamp records the changeset's position in history; ordering
/// within the review pipeline always follows graph topology instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    id: ChangesetId,
    description: String,
    timestamp: DateTime<Utc>,
}

impl Changeset {
    /// Creates a changeset view.
    #[must_use]
    pub fn new(
        id: impl Into<ChangesetId>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            timestamp,
        }
    }

    /// Returns the changeset identifier.
    #[must_use]
    pub const fn id(&self) -> &ChangesetId {
        &self.id
    }

    /// Returns the full changeset description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the commit timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// The local refs a push sends, as named on its command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PushedRefs {
    /// No refspec was given: the current branch is pushed.
    #[default]
    Head,
    /// `--all`, `--branches` or `--mirror`: every local branch is pushed.
    AllBranches,
    /// Explicit `[+]<src>[:<dst>]` refspecs, in command-line order.
    Refspecs(Vec<String>),
}

impl PushedRefs {
    /// Returns the local side of each refspec, skipping deletions
    /// (`:<dst>`), which send nothing.
    ///
    /// Empty for [`PushedRefs::Head`] and [`PushedRefs::AllBranches`].
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        let Self::Refspecs(refspecs) = self else {
            return Vec::new();
        };
        refspecs
            .iter()
            .filter_map(|refspec| {
                let spec = refspec.strip_prefix('+').unwrap_or(refspec.as_str());
                let source = spec.split_once(':').map_or(spec, |(src, _)| src);
                (!source.is_empty()).then_some(source)
            })
            .collect()
    }
}

/// Result of running the underlying push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushStatus {
    /// The push completed successfully.
    Succeeded,
    /// The push exited unsuccessfully with the given status code.
    Failed {
        /// Exit code reported by the push process.
        code: i32,
    },
}

impl PushStatus {
    /// Returns true when the push completed successfully.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns the process exit code that mirrors this push outcome.
    ///
    /// Codes outside `1..=255` collapse to `1` so a failed push never maps
    /// to a successful exit.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Succeeded => 0,
            Self::Failed { code } => u8::try_from(code)
                .ok()
                .filter(|value| *value != 0)
                .unwrap_or(1),
        }
    }
}
