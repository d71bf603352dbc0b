//! Push interception: run the push, then (only on success) the review.
//!
//! ```text
//! PushPending ──push──▶ PushSucceeded ──▶ ReviewPipeline::run
//!              └──────▶ PushFailed   (no review)
//! ```

mod pipeline;

pub use pipeline::{PipelineReport, ReviewPipeline};

use crate::command::CommandError;
use crate::review::{ReviewError, RevisionSpec};
use crate::service::ReviewCreated;
use crate::vcs::{PushOperation, PushStatus, PushedRefs};

/// Review settings taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewOptions {
    /// Normalised reviewer names.
    pub reviewers: Vec<String>,
    /// Revision specs; empty selects the latest pushed changeset.
    pub revisions: Vec<RevisionSpec>,
    /// Review title.
    pub title: Option<String>,
    /// Explicit comment replacing the aggregated descriptions.
    pub comment: Option<String>,
    /// Whether to edit the comment in an external editor.
    pub use_editor: bool,
}

/// One invocation of the wrapped push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushInvocation {
    /// Arguments passed to `git push` untouched.
    pub push_args: Vec<String>,
    /// The push destination (remote alias or URL), when one was named.
    pub destination: Option<String>,
    /// The local refs the push sends.
    pub pushed_refs: PushedRefs,
    /// Review settings; `None` when review was bypassed with `--rr none`.
    pub review: Option<ReviewOptions>,
}

/// What happened to the review after the push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// `--rr none` was given.
    Bypassed,
    /// The review service is not configured.
    NotConfigured,
    /// The push failed, so no review was attempted.
    PushFailed,
    /// Nothing was pushed and no revisions were named.
    NothingToReview,
    /// The review was created.
    Created(ReviewCreated),
    /// The review could not be created.
    Abandoned(ReviewError),
}

/// Combined result of the push and the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptReport {
    /// How the push ended.
    pub push: PushStatus,
    /// What happened to the review.
    pub outcome: ReviewOutcome,
    /// Problems that did not stop the push or the review.
    pub warnings: Vec<ReviewError>,
}

impl InterceptReport {
    /// The process exit code: always the push's.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.push.exit_code()
    }
}

/// Wraps a push with review creation.
#[derive(Debug, Clone, Copy)]
pub struct PushInterceptor<'a> {
    pusher: &'a dyn PushOperation,
    pipeline: Option<ReviewPipeline<'a>>,
}

impl<'a> PushInterceptor<'a> {
    /// Creates an interceptor; without a pipeline every push is plain.
    #[must_use]
    pub const fn new(pusher: &'a dyn PushOperation, pipeline: Option<ReviewPipeline<'a>>) -> Self {
        Self { pusher, pipeline }
    }

    /// Runs the push and, if it succeeds, the review pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::PushLaunch`] when the push could not be
    /// started. Review failures are never errors; they are in the report.
    pub fn run(&self, invocation: &PushInvocation) -> Result<InterceptReport, CommandError> {
        let destination = invocation.destination.as_deref();
        let mut warnings = Vec::new();

        let armed = match (&invocation.review, self.pipeline) {
            (Some(options), Some(pipeline)) => {
                // Captured before pushing: afterwards the remote refs already
                // include the transmitted changesets.
                let pushed = pipeline
                    .outgoing(destination, &invocation.pushed_refs)
                    .unwrap_or_else(|error| {
                        tracing::warn!("could not list outgoing changesets: {error}");
                        warnings.push(error);
                        Vec::new()
                    });
                Some((options, pipeline, pushed))
            }
            _ => None,
        };

        let push = self.pusher.push(&invocation.push_args)?;

        let outcome = match armed {
            None if invocation.review.is_none() => ReviewOutcome::Bypassed,
            _ if !push.is_success() => ReviewOutcome::PushFailed,
            None => ReviewOutcome::NotConfigured,
            Some((options, pipeline, pushed)) => {
                let report = pipeline.run(options, destination, &pushed);
                warnings.extend(report.warnings);
                report.outcome
            }
        };

        Ok(InterceptReport {
            push,
            outcome,
            warnings,
        })
    }
}
