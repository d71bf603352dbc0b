//! Tests for external editor selection and buffer handling.

use rstest::rstest;

use super::{CommentEditor, EditorError, ExternalEditor, render_buffer, strip_instructions};

#[test]
fn buffer_round_trips_through_instruction_stripping() {
    let buffer = render_buffer("Add parser\nFix parser");

    assert!(buffer.starts_with("Add parser\nFix parser\n\nREVIEW: "));
    assert_eq!(strip_instructions(&buffer), "Add parser\nFix parser");
}

#[test]
fn user_lines_with_the_instruction_prefix_are_kept() {
    let mut buffer = render_buffer("Summary\nREVIEW: check the migration first");
    buffer.push_str("REVIEW: and the rollback\n");

    assert_eq!(
        strip_instructions(&buffer),
        "Summary\nREVIEW: check the migration first\n\nREVIEW: and the rollback"
    );
}

#[test]
fn stripping_an_untouched_empty_buffer_yields_nothing() {
    assert_eq!(strip_instructions(&render_buffer("")), "");
}

#[rstest]
#[case::configured(Some("nano -w"), [Some("code --wait"), Some("emacs"), Some("ed")], "nano -w")]
#[case::git_editor(None, [Some("code --wait"), Some("emacs"), Some("ed")], "code --wait")]
#[case::visual(Some("  "), [None, Some("emacs"), Some("ed")], "emacs")]
#[case::editor(None, [Some(""), None, Some("ed")], "ed")]
#[case::fallback(None, [None, None, None], "vi")]
fn editor_selection_follows_precedence(
    #[case] configured: Option<&str>,
    #[case] env: [Option<&str>; 3],
    #[case] expected: &str,
) {
    let [git_editor, visual, editor] = env;
    let _guard = env_lock::lock_env([
        ("GIT_EDITOR", git_editor),
        ("VISUAL", visual),
        ("EDITOR", editor),
    ]);

    let selected = ExternalEditor::from_environment(configured);

    assert_eq!(selected.command(), expected);
}

#[test]
fn unchanged_buffer_returns_the_initial_text() {
    let editor = ExternalEditor::new("true");

    let comment = editor
        .edit("Add parser")
        .expect("no-op editor should keep the text");

    assert_eq!(comment, "Add parser");
}

#[test]
fn edited_buffer_becomes_the_comment() {
    let editor = ExternalEditor::new(
        r#"sh -c 'printf "Rewritten comment\nREVIEW: ignored\n" > "$0"'"#,
    );

    let comment = editor.edit("Add parser").expect("editing should succeed");

    assert_eq!(comment, "Rewritten comment");
}

#[test]
fn untouched_empty_buffer_is_reported() {
    let editor = ExternalEditor::new("true");

    let error = editor.edit("").expect_err("empty buffer should fail");

    assert_eq!(error, EditorError::EmptyBuffer);
}

#[test]
fn failing_editor_is_reported_as_abnormal_exit() {
    let editor = ExternalEditor::new("false");

    let error = editor
        .edit("Add parser")
        .expect_err("failing editor should abort");

    assert!(
        matches!(&error, EditorError::AbnormalExit { editor, .. } if editor == "false"),
        "expected AbnormalExit, got {error:?}"
    );
}
