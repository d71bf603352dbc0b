//! Scripted review service for unit and behavioural tests.

use std::sync::{Mutex, PoisonError};

use crate::review::{ReviewError, ReviewRequest};

use super::{Credentials, ReviewCreated, ReviewService};

/// Review service that answers every request with a fixed outcome and
/// records what it was sent.
#[derive(Debug)]
pub struct StubReviewService {
    service_url: String,
    outcome: Result<ReviewCreated, ReviewError>,
    requests: Mutex<Vec<ReviewRequest>>,
}

impl StubReviewService {
    /// A service that accepts every request as review `id`.
    #[must_use]
    pub fn accepting(id: &str) -> Self {
        let service_url = "https://review.example.com".to_owned();
        let created = ReviewCreated::new(id, format!("{service_url}/Review/{id}"));
        Self::with_outcome(service_url, Ok(created))
    }

    /// A service that fails every request with `error`.
    #[must_use]
    pub fn failing(error: ReviewError) -> Self {
        Self::with_outcome("https://review.example.com".to_owned(), Err(error))
    }

    const fn with_outcome(
        service_url: String,
        outcome: Result<ReviewCreated, ReviewError>,
    ) -> Self {
        Self {
            service_url,
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns every request submitted so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ReviewRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ReviewService for StubReviewService {
    fn service_url(&self) -> &str {
        &self.service_url
    }

    fn create_review(
        &self,
        request: &ReviewRequest,
        _credentials: &Credentials,
    ) -> Result<ReviewCreated, ReviewError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.outcome.clone()
    }
}
