//! Review request assembly and target repository resolution.

use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::vcs::Changeset;

use super::error::ReviewError;
use super::resolver::dedup_changesets;

/// Path segment under the service prefix that hosts repositories.
const CODE_PATH_SEGMENT: &str = "code";

/// Everything the review service needs to create one review.
///
/// Construct through [`ReviewRequest::builder`], which guarantees a
/// non-empty, duplicate-free changeset list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    repository: String,
    changesets: Vec<Changeset>,
    title: Option<String>,
    comment: String,
    reviewers: Vec<String>,
}

impl ReviewRequest {
    /// Starts a request targeting the given review-service repository.
    #[must_use]
    pub fn builder(repository: impl Into<String>) -> ReviewRequestBuilder {
        ReviewRequestBuilder {
            repository: repository.into(),
            changesets: Vec::new(),
            fallback: None,
            title: None,
            comment: String::new(),
            reviewers: Vec::new(),
        }
    }

    /// Returns the review-service repository identifier.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the changesets under review, in resolution order.
    #[must_use]
    pub fn changesets(&self) -> &[Changeset] {
        &self.changesets
    }

    /// Returns the review title, if one was given.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the review comment (possibly empty).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the reviewer names.
    #[must_use]
    pub fn reviewers(&self) -> &[String] {
        &self.reviewers
    }
}

/// Builder for [`ReviewRequest`].
#[derive(Debug, Clone)]
pub struct ReviewRequestBuilder {
    repository: String,
    changesets: Vec<Changeset>,
    fallback: Option<Changeset>,
    title: Option<String>,
    comment: String,
    reviewers: Vec<String>,
}

impl ReviewRequestBuilder {
    /// Sets the resolved changesets.
    #[must_use]
    pub fn changesets(mut self, changesets: Vec<Changeset>) -> Self {
        self.changesets = changesets;
        self
    }

    /// Sets the changeset used when resolution produced nothing: the most
    /// recent pushed changeset.
    #[must_use]
    pub fn fallback(mut self, changeset: Option<Changeset>) -> Self {
        self.fallback = changeset;
        self
    }

    /// Sets the title; blank titles are dropped.
    #[must_use]
    pub fn title(mut self, title: Option<&str>) -> Self {
        self.title = title
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned);
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the already-normalised reviewer names.
    #[must_use]
    pub fn reviewers(mut self, reviewers: Vec<String>) -> Self {
        self.reviewers = reviewers;
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NothingToReview`] when there are no changesets
    /// and no fallback.
    pub fn build(self) -> Result<ReviewRequest, ReviewError> {
        let mut changesets = dedup_changesets(self.changesets);
        if changesets.is_empty() {
            changesets.extend(self.fallback);
        }
        if changesets.is_empty() {
            return Err(ReviewError::NothingToReview);
        }

        Ok(ReviewRequest {
            repository: self.repository,
            changesets,
            title: self.title,
            comment: self.comment,
            reviewers: self.reviewers,
        })
    }
}

/// An explicit `<url>=<identifier>` entry from the `repositories` setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMapping {
    url: String,
    identifier: String,
}

/// Parse error for [`RepositoryMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("repository mapping '{value}' must look like <remote-url>=<review-repository>")]
pub struct RepositoryMappingParseError {
    value: String,
}

impl RepositoryMapping {
    /// Creates a mapping from a push URL to a review-service repository.
    #[must_use]
    pub fn new(url: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            identifier: identifier.into(),
        }
    }

    fn matches(&self, url: &str) -> bool {
        normalise_url(&self.url) == normalise_url(url)
    }
}

impl FromStr for RepositoryMapping {
    type Err = RepositoryMappingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || RepositoryMappingParseError {
            value: value.to_owned(),
        };
        // URLs may carry `=` in their query, so the identifier follows the last one.
        let (url, identifier) = value.rsplit_once('=').ok_or_else(invalid)?;
        let (trimmed_url, trimmed_identifier) = (url.trim(), identifier.trim());
        if trimmed_url.is_empty() || trimmed_identifier.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(trimmed_url, trimmed_identifier))
    }
}

/// Maps push destinations to review-service repository identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetResolver {
    service_url: Url,
    mappings: Vec<RepositoryMapping>,
}

impl TargetResolver {
    /// Creates a resolver for the service at `service_url`.
    #[must_use]
    pub const fn new(service_url: Url, mappings: Vec<RepositoryMapping>) -> Self {
        Self {
            service_url,
            mappings,
        }
    }

    /// Resolves the repository a push to `destination_url` targets.
    ///
    /// Explicit mappings win; otherwise a URL shaped like
    /// `<service>/code/<project>/<group>/<repo>` yields
    /// `<project>/<group>/<repo>`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::UnresolvedTarget`] naming `destination_label`
    /// when neither rule applies.
    pub fn resolve(
        &self,
        destination_url: Option<&str>,
        destination_label: &str,
    ) -> Result<String, ReviewError> {
        let unresolved = || ReviewError::UnresolvedTarget {
            destination: destination_label.to_owned(),
        };
        let url = destination_url.ok_or_else(unresolved)?;

        if let Some(mapping) = self.mappings.iter().find(|mapping| mapping.matches(url)) {
            tracing::debug!("push URL {url} mapped explicitly to {}", mapping.identifier);
            return Ok(mapping.identifier.clone());
        }

        self.identifier_from_layout(url).ok_or_else(unresolved)
    }

    fn identifier_from_layout(&self, url: &str) -> Option<String> {
        let prefix = format!(
            "{}/{CODE_PATH_SEGMENT}/",
            normalise_url(self.service_url.as_str())
        );
        let candidate = normalise_url(url);
        let remainder = candidate.strip_prefix(&prefix)?;

        let segments: Vec<&str> = remainder.split('/').collect();
        match segments.as_slice() {
            [project, group, repo] if [project, group, repo].iter().all(|s| !s.is_empty()) => {
                Some(format!("{project}/{group}/{repo}"))
            }
            _ => None,
        }
    }
}

/// Normalises a URL for comparison: trimmed, lowercase, without trailing
/// `/` or `.git`.
fn normalise_url(url: &str) -> String {
    let lowered = url.trim().to_lowercase();
    let without_slash = lowered.trim_end_matches('/');
    without_slash
        .strip_suffix(".git")
        .unwrap_or(without_slash)
        .trim_end_matches('/')
        .to_owned()
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
