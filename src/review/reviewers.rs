//! Reviewer list normalisation for repeatable `--rr` flags.

use std::collections::HashSet;

/// Reviewer value that disables review creation for a push.
pub const BYPASS_REVIEWER: &str = "none";

/// Splits every `--rr` value on commas and merges the results.
///
/// Entries are trimmed, empty entries dropped, and repeats removed while
/// keeping the first spelling of each name. Names compare case-insensitively.
#[must_use]
pub fn normalise_reviewers<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(ToOwned::to_owned)
        .collect()
}

/// Returns true when the reviewers amount to `--rr none`.
#[must_use]
pub fn is_bypass(reviewers: &[String]) -> bool {
    matches!(reviewers, [only] if only.eq_ignore_ascii_case(BYPASS_REVIEWER))
}
