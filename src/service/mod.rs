//! Submission of review requests to the review service.
//!
//! [`ReviewService`] is the seam the interceptor calls through;
//! [`HttpReviewService`] is the production implementation and
//! [`CredentialStore`] supplies the basic-auth pair it sends.

mod client;
mod credentials;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::fmt;

pub use client::{DEFAULT_TIMEOUT_SECS, HttpReviewService, ReviewServiceConfig};
pub use credentials::{ConfiguredCredentials, CredentialStore, Credentials};

use crate::review::{ReviewError, ReviewRequest};

/// A review the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCreated {
    id: String,
    url: String,
}

impl ReviewCreated {
    /// Creates a confirmation from the service's identifier and page URL.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }

    /// Returns the review identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the URL of the review page.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Creates reviews on a remote review service.
pub trait ReviewService: Send + Sync + fmt::Debug {
    /// Returns the service URL prefix, used for credential lookup.
    fn service_url(&self) -> &str;

    /// Submits one review request.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Authentication`] when the service rejects the
    /// credentials, [`ReviewError::Transport`] when it cannot be reached, and
    /// [`ReviewError::Protocol`] for any other unexpected response.
    fn create_review(
        &self,
        request: &ReviewRequest,
        credentials: &Credentials,
    ) -> Result<ReviewCreated, ReviewError>;
}
