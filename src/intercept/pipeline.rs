//! The post-push review pipeline.

use crate::review::{
    ChangesetResolver, CommentEditor, ReviewError, ReviewRequest, TargetResolver,
    assemble_comment,
};
use crate::service::{CredentialStore, ReviewCreated, ReviewService};
use crate::vcs::{Changeset, PushedRefs, VersionControl};

use super::{ReviewOptions, ReviewOutcome};

/// Label used in messages when the push names no destination.
const DEFAULT_DESTINATION_LABEL: &str = "(default remote)";

/// Result of one pipeline run: the outcome plus any degraded steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// What happened to the review.
    pub outcome: ReviewOutcome,
    /// Problems that did not stop the review, such as an aborted edit.
    pub warnings: Vec<ReviewError>,
}

/// Collaborators for turning a successful push into a review.
#[derive(Debug, Clone, Copy)]
pub struct ReviewPipeline<'a> {
    vcs: &'a dyn VersionControl,
    target: &'a TargetResolver,
    credentials: &'a dyn CredentialStore,
    service: &'a dyn ReviewService,
    editor: &'a dyn CommentEditor,
}

impl<'a> ReviewPipeline<'a> {
    /// Wires the pipeline's collaborators.
    #[must_use]
    pub const fn new(
        vcs: &'a dyn VersionControl,
        target: &'a TargetResolver,
        credentials: &'a dyn CredentialStore,
        service: &'a dyn ReviewService,
        editor: &'a dyn CommentEditor,
    ) -> Self {
        Self {
            vcs,
            target,
            credentials,
            service,
            editor,
        }
    }

    /// Lists what a push of `refs` to `destination` is about to transmit.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Repository`] when the graph cannot be read or
    /// a refspec names no changeset.
    pub fn outgoing(
        &self,
        destination: Option<&str>,
        refs: &PushedRefs,
    ) -> Result<Vec<Changeset>, ReviewError> {
        self.vcs
            .outgoing(destination, refs)
            .map_err(|error| ReviewError::Repository {
                message: error.to_string(),
            })
    }

    /// Creates the review for a push that has already succeeded.
    ///
    /// `pushed` lists the changesets the push transmitted, oldest first.
    /// Nothing here can fail the command: every error ends up in the
    /// returned report.
    #[must_use]
    pub fn run(
        &self,
        options: &ReviewOptions,
        destination: Option<&str>,
        pushed: &[Changeset],
    ) -> PipelineReport {
        let mut warnings = Vec::new();
        let outcome = match self.submit(options, destination, pushed, &mut warnings) {
            Ok(created) => ReviewOutcome::Created(created),
            Err(error) if error.is_no_op() => ReviewOutcome::NothingToReview,
            Err(error) => {
                tracing::warn!("review abandoned: {error}");
                ReviewOutcome::Abandoned(error)
            }
        };
        PipelineReport { outcome, warnings }
    }

    fn submit(
        &self,
        options: &ReviewOptions,
        destination: Option<&str>,
        pushed: &[Changeset],
        warnings: &mut Vec<ReviewError>,
    ) -> Result<ReviewCreated, ReviewError> {
        let changesets = ChangesetResolver::new(self.vcs).resolve(&options.revisions, pushed)?;

        // Target and credentials come before the editor so a doomed review
        // never asks the user to write a comment.
        let repository = self.resolve_repository(destination)?;
        let credentials = self.credentials.credentials_for(self.service.service_url())?;

        let editor = options.use_editor.then_some(self.editor);
        let comment = assemble_comment(&changesets, options.comment.as_deref(), editor)
            .unwrap_or_else(|error| {
                tracing::warn!("{error}");
                warnings.push(error);
                String::new()
            });

        let request = ReviewRequest::builder(repository)
            .changesets(changesets)
            .fallback(pushed.last().cloned())
            .title(options.title.as_deref())
            .comment(comment)
            .reviewers(options.reviewers.clone())
            .build()?;

        self.service.create_review(&request, &credentials)
    }

    fn resolve_repository(&self, destination: Option<&str>) -> Result<String, ReviewError> {
        let url = self
            .vcs
            .destination_url(destination)
            .map_err(|error| ReviewError::Repository {
                message: error.to_string(),
            })?;
        let label = destination.unwrap_or(DEFAULT_DESTINATION_LABEL);
        self.target.resolve(url.as_deref(), label)
    }
}
