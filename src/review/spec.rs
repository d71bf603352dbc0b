//! Revision specifications accepted by `--rrev`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One `--rrev` value: a single changeset or an inclusive `FROM:TO` range.
///
/// Git ref names cannot contain `:`, so the first colon always separates the
/// two ends of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionSpec {
    /// A single changeset identifier or ref name.
    Single(String),
    /// Every changeset on the ancestry path from `from` to `to`.
    Range {
        /// Oldest end of the range.
        from: String,
        /// Newest end of the range.
        to: String,
    },
}

/// Parse error for [`RevisionSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed revision '{value}': expected a changeset id or FROM:TO")]
pub struct RevisionSpecParseError {
    value: String,
}

impl RevisionSpecParseError {
    /// Returns the rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for RevisionSpec {
    type Err = RevisionSpecParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || RevisionSpecParseError {
            value: value.to_owned(),
        };
        let trimmed = value.trim();

        match trimmed.split_once(':') {
            None if !trimmed.is_empty() => Ok(Self::Single(trimmed.to_owned())),
            None => Err(malformed()),
            Some((from, to)) => {
                let (start, end) = (from.trim(), to.trim());
                if start.is_empty() || end.is_empty() || end.contains(':') {
                    return Err(malformed());
                }
                Ok(Self::Range {
                    from: start.to_owned(),
                    to: end.to_owned(),
                })
            }
        }
    }
}

impl fmt::Display for RevisionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => write!(f, "{id}"),
            Self::Range { from, to } => write!(f, "{from}:{to}"),
        }
    }
}
