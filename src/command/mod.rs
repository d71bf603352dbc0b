//! Command-line handling: review flags, push arguments, and validation.
//!
//! Review flags may appear anywhere among the `git push` arguments, so the
//! command line is first partitioned, then the review half is parsed with
//! clap and the push half is scanned for its destination.

mod error;
mod flags;
mod partition;

pub use error::CommandError;
pub use flags::{HELP_FLAG, ReviewFlags};
pub use partition::{PartitionedArgs, detect_destination, detect_pushed_refs, partition_args};

use crate::intercept::{PushInvocation, ReviewOptions};
use crate::review::{RevisionSpec, is_bypass, normalise_reviewers};
use crate::vcs::PushedRefs;

/// A parsed command line that has not yet been validated for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    flags: ReviewFlags,
    push_args: Vec<String>,
    destination: Option<String>,
    pushed_refs: PushedRefs,
}

impl CommandLine {
    /// Parses the arguments that follow the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Usage`] for misused flags or conflicting
    /// destinations, and [`CommandError::HelpRequested`] for `--rhelp`.
    pub fn parse<I, S>(args: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let PartitionedArgs { review, push } = partition_args(args)?;
        let flags = ReviewFlags::parse_flags(&review)?;
        let destination = detect_destination(&push)?;
        let pushed_refs = detect_pushed_refs(&push);
        Ok(Self {
            flags,
            push_args: push,
            destination,
            pushed_refs,
        })
    }

    /// Returns the parsed review flags.
    #[must_use]
    pub const fn flags(&self) -> &ReviewFlags {
        &self.flags
    }

    /// Discards the review flags: the push runs without a review.
    #[must_use]
    pub fn into_plain_push(self) -> PushInvocation {
        PushInvocation {
            push_args: self.push_args,
            destination: self.destination,
            pushed_refs: self.pushed_refs,
            review: None,
        }
    }

    /// Validates the review flags and produces the invocation to run.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MissingReviewers`] when no reviewer was given
    /// and [`CommandError::MalformedSpec`] for an unparseable `--rrev`.
    pub fn into_invocation(self) -> Result<PushInvocation, CommandError> {
        let reviewers = normalise_reviewers(&self.flags.reviewers);
        if is_bypass(&reviewers) {
            tracing::debug!("review bypassed with --rr none");
            return Ok(self.into_plain_push());
        }
        if reviewers.is_empty() {
            return Err(CommandError::MissingReviewers);
        }

        let revisions = self
            .flags
            .revisions
            .iter()
            .map(|value| {
                value
                    .parse::<RevisionSpec>()
                    .map_err(|error| CommandError::MalformedSpec {
                        value: error.value().to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let review = ReviewOptions {
            reviewers,
            revisions,
            title: self.flags.title,
            comment: self.flags.comment,
            use_editor: self.flags.editor,
        };
        Ok(PushInvocation {
            push_args: self.push_args,
            destination: self.destination,
            pushed_refs: self.pushed_refs,
            review: Some(review),
        })
    }
}
