//! Review comment assembly.

use crate::vcs::Changeset;

use super::editor::CommentEditor;
use super::error::ReviewError;

/// Joins the non-empty changeset descriptions, one per line, in order.
#[must_use]
pub fn aggregate_descriptions(changesets: &[Changeset]) -> String {
    changesets
        .iter()
        .map(Changeset::description)
        .filter(|description| !description.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produces the review comment.
///
/// The default text is `explicit` when given, otherwise the aggregated
/// descriptions. With an editor, the default text seeds the editor buffer
/// and the edited text becomes the comment.
///
/// # Errors
///
/// Returns [`ReviewError::EditAborted`] when the editor session fails or
/// leaves the buffer empty. Callers continue with an empty comment.
pub fn assemble_comment(
    changesets: &[Changeset],
    explicit: Option<&str>,
    editor: Option<&dyn CommentEditor>,
) -> Result<String, ReviewError> {
    let default_text = explicit.map_or_else(|| aggregate_descriptions(changesets), ToOwned::to_owned);

    let Some(comment_editor) = editor else {
        return Ok(default_text);
    };

    comment_editor
        .edit(&default_text)
        .map_err(|error| ReviewError::EditAborted {
            reason: error.to_string(),
        })
}
