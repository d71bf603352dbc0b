//! Tests for the typed configuration accessors.

use std::time::Duration;

use rstest::rstest;

use crate::PushReviewConfig;
use crate::command::CommandError;
use crate::review::RepositoryMapping;
use crate::service::{ConfiguredCredentials, CredentialStore};

#[test]
fn defaults_leave_reviews_unconfigured() {
    let config = PushReviewConfig::default();

    assert_eq!(config.service_url().expect("default should be valid"), None);
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert!(config.repositories.is_empty());
}

#[rstest]
#[case::blank(Some("   "))]
#[case::unset(None)]
fn blank_service_url_means_unconfigured(#[case] value: Option<&str>) {
    let config = PushReviewConfig {
        service_url: value.map(ToOwned::to_owned),
        ..PushReviewConfig::default()
    };

    assert_eq!(config.service_url().expect("blank should be valid"), None);
}

#[test]
fn service_url_is_parsed() {
    let config = PushReviewConfig {
        service_url: Some(" https://review.example.com/ ".to_owned()),
        ..PushReviewConfig::default()
    };

    let url = config
        .service_url()
        .expect("URL should be valid")
        .expect("URL should be present");

    assert_eq!(url.as_str(), "https://review.example.com/");
}

#[rstest]
#[case::not_a_url("review.example.com")]
#[case::wrong_scheme("ftp://review.example.com/")]
fn invalid_service_urls_are_configuration_errors(#[case] value: &str) {
    let config = PushReviewConfig {
        service_url: Some(value.to_owned()),
        ..PushReviewConfig::default()
    };

    let error = config.service_url().expect_err("URL should be rejected");

    assert!(
        matches!(error, CommandError::Configuration { .. }),
        "expected Configuration, got {error:?}"
    );
}

#[rstest]
#[case::zero(0, 30)]
#[case::custom(5, 5)]
fn timeout_falls_back_for_zero(#[case] seconds: u64, #[case] expected: u64) {
    let config = PushReviewConfig {
        timeout_seconds: seconds,
        ..PushReviewConfig::default()
    };

    assert_eq!(config.timeout(), Duration::from_secs(expected));
}

#[test]
fn repository_mappings_parse_every_entry() {
    let config = PushReviewConfig {
        repositories: vec![
            "https://git.example.com/a.git=app/core/a".to_owned(),
            "git@git.example.com:b.git = app/core/b".to_owned(),
        ],
        ..PushReviewConfig::default()
    };

    let mappings = config.repository_mappings().expect("mappings should parse");

    assert_eq!(
        mappings,
        vec![
            RepositoryMapping::new("https://git.example.com/a.git", "app/core/a"),
            RepositoryMapping::new("git@git.example.com:b.git", "app/core/b"),
        ]
    );
}

#[test]
fn malformed_mapping_is_a_configuration_error() {
    let config = PushReviewConfig {
        repositories: vec!["https://git.example.com/a.git".to_owned()],
        ..PushReviewConfig::default()
    };

    let error = config
        .repository_mappings()
        .expect_err("mapping without identifier should fail");

    assert!(
        matches!(&error, CommandError::Configuration { message } if message.contains("https://git.example.com/a.git")),
        "expected Configuration, got {error:?}"
    );
}

#[test]
fn credentials_come_from_username_and_password() {
    let config = PushReviewConfig {
        username: Some("dev".to_owned()),
        password: Some("secret".to_owned()),
        ..PushReviewConfig::default()
    };

    let credentials = config.credentials();

    assert_eq!(
        credentials,
        ConfiguredCredentials::new(Some("dev".to_owned()), Some("secret".to_owned()))
    );
    assert!(credentials.credentials_for("https://review.example.com").is_ok());
}

#[test]
fn debug_output_redacts_the_password() {
    let config = PushReviewConfig {
        password: Some("hunter2".to_owned()),
        ..PushReviewConfig::default()
    };

    assert!(!format!("{config:?}").contains("hunter2"));
}
