//! Unit tests for review request assembly and target resolution.

use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};
use url::Url;

use crate::review::ReviewError;
use crate::vcs::Changeset;

use super::{RepositoryMapping, ReviewRequest, TargetResolver};

fn changeset(id: &str) -> Changeset {
    Changeset::new(id, format!("change {id}"), DateTime::<Utc>::default())
}

#[fixture]
fn resolver() -> TargetResolver {
    let service_url = Url::parse("https://review.example.com/").expect("valid URL");
    TargetResolver::new(
        service_url,
        vec![RepositoryMapping::new(
            "git@github.com:example/mirror.git",
            "Tools/Mirrors/mirror",
        )],
    )
}

#[test]
fn builder_deduplicates_changesets_and_drops_blank_titles() {
    let request = ReviewRequest::builder("app/core/web")
        .changesets(vec![changeset("c1"), changeset("c2"), changeset("c1")])
        .title(Some("   "))
        .comment("Add parser")
        .reviewers(vec!["tim".to_owned()])
        .build()
        .expect("request should build");

    let ids: Vec<&str> = request
        .changesets()
        .iter()
        .map(|item| item.id().as_str())
        .collect();
    assert_eq!(ids, vec!["c1", "c2"]);
    assert_eq!(request.title(), None);
    assert_eq!(request.comment(), "Add parser");
    assert_eq!(request.reviewers(), ["tim".to_owned()]);
    assert_eq!(request.repository(), "app/core/web");
}

#[test]
fn builder_falls_back_to_the_latest_pushed_changeset() {
    let request = ReviewRequest::builder("app/core/web")
        .fallback(Some(changeset("c3")))
        .title(Some(" Parser work "))
        .build()
        .expect("fallback should satisfy the invariant");

    assert_eq!(request.changesets(), [changeset("c3")]);
    assert_eq!(request.title(), Some("Parser work"));
}

#[test]
fn builder_requires_at_least_one_changeset() {
    let error = ReviewRequest::builder("app/core/web")
        .build()
        .expect_err("empty request should fail");

    assert_eq!(error, ReviewError::NothingToReview);
}

#[rstest]
#[case::plain("https://review.example.com/code/App/Core/Web", "app/core/web")]
#[case::git_suffix("https://review.example.com/code/app/core/web.git", "app/core/web")]
#[case::trailing_slash("https://review.example.com/code/app/core/web/", "app/core/web")]
#[case::explicit_mapping("git@github.com:Example/mirror.git/", "Tools/Mirrors/mirror")]
fn resolves_known_destinations(
    resolver: TargetResolver,
    #[case] url: &str,
    #[case] expected: &str,
) {
    let identifier = resolver
        .resolve(Some(url), "origin")
        .expect("destination should resolve");

    assert_eq!(identifier, expected);
}

#[rstest]
#[case::other_host(Some("https://elsewhere.example.com/code/app/core/web"))]
#[case::too_short(Some("https://review.example.com/code/app/core"))]
#[case::too_long(Some("https://review.example.com/code/app/core/web/extra"))]
#[case::not_code(Some("https://review.example.com/Review/12"))]
#[case::no_url(None)]
fn reports_unresolved_destinations(resolver: TargetResolver, #[case] url: Option<&str>) {
    let error = resolver
        .resolve(url, "upstream")
        .expect_err("destination should not resolve");

    assert_eq!(
        error,
        ReviewError::UnresolvedTarget {
            destination: "upstream".to_owned()
        }
    );
}

#[rstest]
#[case::simple("https://host/x=proj/grp/repo", "https://host/x", "proj/grp/repo")]
#[case::query("https://host/x?a=b=proj/grp/repo", "https://host/x?a=b", "proj/grp/repo")]
fn parses_repository_mappings(#[case] input: &str, #[case] url: &str, #[case] identifier: &str) {
    let mapping: RepositoryMapping = input.parse().expect("mapping should parse");

    assert_eq!(mapping, RepositoryMapping::new(url, identifier));
}

#[rstest]
#[case::no_separator("https://host/x")]
#[case::empty_identifier("https://host/x=")]
#[case::empty_url(" =proj")]
fn rejects_malformed_repository_mappings(#[case] input: &str) {
    assert!(input.parse::<RepositoryMapping>().is_err());
}
