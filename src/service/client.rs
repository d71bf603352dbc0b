//! HTTP implementation of the review-creation endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::review::{ReviewError, ReviewRequest};

use super::credentials::Credentials;
use super::{ReviewCreated, ReviewService};

const CREATE_REVIEW_PATH: &str = "Api/1.0/Review/Create";
const REVIEW_PAGE_PATH: &str = "Review";
/// Request timeout used when configuration does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ERROR_BODY_LIMIT: usize = 160;

/// Configuration for [`HttpReviewService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewServiceConfig {
    /// Service URL prefix, e.g. `https://review.example.com/`.
    pub base_url: Url,
    /// HTTP timeout for the create request.
    pub timeout: Duration,
}

impl ReviewServiceConfig {
    /// Creates configuration with the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Review service reached over blocking HTTP with basic authentication.
///
/// Each call makes exactly one request; failures are never retried.
#[derive(Debug, Clone)]
pub struct HttpReviewService {
    config: ReviewServiceConfig,
}

impl HttpReviewService {
    /// Creates a client for the configured service.
    #[must_use]
    pub const fn new(config: ReviewServiceConfig) -> Self {
        Self { config }
    }

    fn prefix(&self) -> &str {
        self.config.base_url.as_str().trim_end_matches('/')
    }

    fn create_http_client(&self) -> Result<Client, ReviewError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| ReviewError::Transport {
                message: format!("failed to configure HTTP client: {error}"),
            })
    }
}

impl ReviewService for HttpReviewService {
    fn service_url(&self) -> &str {
        self.prefix()
    }

    fn create_review(
        &self,
        request: &ReviewRequest,
        credentials: &Credentials,
    ) -> Result<ReviewCreated, ReviewError> {
        let endpoint = format!("{}/{CREATE_REVIEW_PATH}", self.prefix());
        let payload = CreateReviewPayload::from_request(request);
        let client = self.create_http_client()?;

        tracing::debug!(
            "creating review in {} for {} changeset(s)",
            request.repository(),
            request.changesets().len()
        );
        let response = client
            .post(endpoint)
            .basic_auth(credentials.username(), Some(credentials.password()))
            .json(&payload)
            .send()
            .map_err(|error| ReviewError::Transport {
                message: error.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|error| ReviewError::Transport {
            message: format!("failed to read response body: {error}"),
        })?;

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ReviewError::Authentication {
                message: describe_failure(status, &body),
            });
        }
        if !status.is_success() {
            return Err(ReviewError::Protocol {
                message: describe_failure(status, &body),
            });
        }

        let decoded: CreateReviewResponse =
            serde_json::from_str(&body).map_err(|error| ReviewError::Protocol {
                message: format!("response JSON decoding failed: {error}"),
            })?;
        let id = decoded
            .review_id
            .map(ReviewIdentifier::into_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ReviewError::Protocol {
                message: "response did not contain a review identifier".to_owned(),
            })?;
        let url = decoded
            .url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| format!("{}/{REVIEW_PAGE_PATH}/{id}", self.prefix()));

        Ok(ReviewCreated::new(id, url))
    }
}

#[derive(Debug, Serialize)]
struct CreateReviewPayload<'a> {
    repository: &'a str,
    changesets: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    comment: &'a str,
    reviewers: &'a [String],
}

impl<'a> CreateReviewPayload<'a> {
    fn from_request(request: &'a ReviewRequest) -> Self {
        Self {
            repository: request.repository(),
            changesets: request
                .changesets()
                .iter()
                .map(|changeset| changeset.id().as_str())
                .collect(),
            title: request.title(),
            comment: request.comment(),
            reviewers: request.reviewers(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateReviewResponse {
    #[serde(alias = "ixReview")]
    review_id: Option<ReviewIdentifier>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReviewIdentifier {
    Number(u64),
    Text(String),
}

impl ReviewIdentifier {
    fn into_string(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.trim().to_owned(),
        }
    }
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    let detail = truncate_for_message(body.trim(), ERROR_BODY_LIMIT);
    if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {detail}", status.as_u16())
    }
}

fn truncate_for_message(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
