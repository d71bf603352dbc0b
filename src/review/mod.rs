//! The review pipeline: from revision specs to a ready-to-send request.
//!
//! - [`resolver`]: `--rrev` specs → ordered, deduplicated changesets
//! - [`comment`]: aggregated descriptions or editor-produced text
//! - [`payload`]: the [`ReviewRequest`] and its target repository
//! - [`reviewers`]: merging of repeatable `--rr` values

pub mod comment;
pub mod editor;
pub mod payload;
pub mod resolver;
pub mod reviewers;

mod error;
mod spec;

pub use comment::{aggregate_descriptions, assemble_comment};
pub use editor::{CommentEditor, EditorError, ExternalEditor};
pub use error::ReviewError;
pub use payload::{RepositoryMapping, ReviewRequest, ReviewRequestBuilder, TargetResolver};
pub use resolver::ChangesetResolver;
pub use reviewers::{is_bypass, normalise_reviewers};
pub use spec::{RevisionSpec, RevisionSpecParseError};
