//! Tests for status and warning rendering.

use rstest::rstest;

use crate::command::CommandError;
use crate::intercept::{InterceptReport, ReviewOutcome};
use crate::review::ReviewError;
use crate::service::ReviewCreated;
use crate::vcs::PushStatus;

use super::Reporter;

fn render(report: &InterceptReport) -> (String, String) {
    let mut reporter = Reporter::new(Vec::new(), Vec::new());
    reporter.report(report).expect("in-memory sinks should not fail");
    let (out, err) = reporter.into_inner();
    (
        String::from_utf8(out).expect("output should be UTF-8"),
        String::from_utf8(err).expect("errors should be UTF-8"),
    )
}

fn report(push: PushStatus, outcome: ReviewOutcome, warnings: Vec<ReviewError>) -> InterceptReport {
    InterceptReport {
        push,
        outcome,
        warnings,
    }
}

#[test]
fn created_review_is_printed_to_stdout() {
    let (out, err) = render(&report(
        PushStatus::Succeeded,
        ReviewOutcome::Created(ReviewCreated::new("CR-7", "https://review.example.com/Review/CR-7")),
        Vec::new(),
    ));

    assert_eq!(out, "created review CR-7: https://review.example.com/Review/CR-7\n");
    assert!(err.is_empty());
}

#[test]
fn degraded_steps_are_warnings() {
    let (out, err) = render(&report(
        PushStatus::Succeeded,
        ReviewOutcome::Created(ReviewCreated::new("9", "https://r/9")),
        vec![ReviewError::EditAborted {
            reason: "editor exited with status 1".to_owned(),
        }],
    ));

    assert!(out.starts_with("created review 9"));
    assert!(err.starts_with("warning: comment editing aborted"));
}

#[test]
fn abandoned_review_names_the_cause() {
    let (out, err) = render(&report(
        PushStatus::Succeeded,
        ReviewOutcome::Abandoned(ReviewError::Authentication {
            message: "status 401".to_owned(),
        }),
        Vec::new(),
    ));

    assert!(out.is_empty());
    assert!(err.contains("warning: review not created: review service rejected the credentials"));
}

#[rstest]
#[case::bypassed(PushStatus::Succeeded, ReviewOutcome::Bypassed)]
#[case::not_configured(PushStatus::Succeeded, ReviewOutcome::NotConfigured)]
fn silent_outcomes_write_nothing(#[case] push: PushStatus, #[case] outcome: ReviewOutcome) {
    let (out, err) = render(&report(push, outcome, Vec::new()));

    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn failed_push_mentions_the_exit_status() {
    let (_, err) = render(&report(
        PushStatus::Failed { code: 128 },
        ReviewOutcome::PushFailed,
        Vec::new(),
    ));

    assert_eq!(err, "warning: push failed (exit status 128); no review created\n");
}

#[test]
fn help_goes_to_stdout_and_errors_to_stderr() {
    let mut reporter = Reporter::new(Vec::new(), Vec::new());
    reporter
        .command_error(&CommandError::HelpRequested {
            text: "usage\n".to_owned(),
        })
        .expect("in-memory sinks should not fail");
    reporter
        .command_error(&CommandError::MissingReviewers)
        .expect("in-memory sinks should not fail");

    let (out, err) = reporter.into_inner();
    assert_eq!(out, b"usage\n");
    assert!(String::from_utf8_lossy(&err).starts_with("error: at least one reviewer is required"));
}
