//! Create a code review as a side effect of `git push`.
//!
//! The library resolves revision specifications into changesets, assembles
//! the review comment, maps the push destination to a review-service
//! repository, and submits the review over HTTP. The push itself is run
//! unmodified and its exit status is always preserved.
//!
//! - [`command`]: review flags mixed into `git push` arguments
//! - [`intercept`]: push first, review only on success
//! - [`review`]: changeset resolution, comments, and request assembly
//! - [`service`]: the review service client and credentials
//! - [`vcs`]: Git queries and the wrapped push

pub mod command;
pub mod config;
pub mod intercept;
pub mod report;
pub mod review;
pub mod service;
pub mod vcs;

pub use command::{CommandError, CommandLine};
pub use config::{PushReviewConfig, SETUP_HINT};
pub use intercept::{
    InterceptReport, PushInterceptor, PushInvocation, ReviewOptions, ReviewOutcome,
    ReviewPipeline,
};
pub use report::Reporter;
pub use review::{ReviewError, ReviewRequest, RevisionSpec, TargetResolver};
pub use service::{HttpReviewService, ReviewCreated, ReviewService, ReviewServiceConfig};
pub use vcs::{
    Changeset, ChangesetId, Git2Repository, GitCliPush, PushStatus, PushedRefs, VcsError,
};
