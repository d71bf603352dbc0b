//! Credentials for the review service.

use std::fmt;

use crate::review::ReviewError;

/// Username and password for basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Looks up stored credentials for a review service.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Returns the credentials stored for the service at `service_prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NoCredentials`] when nothing is stored.
    fn credentials_for(&self, service_prefix: &str) -> Result<Credentials, ReviewError>;
}

/// Credentials taken from the loaded configuration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfiguredCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl ConfiguredCredentials {
    /// Wraps the configured username and password, either of which may be
    /// missing.
    #[must_use]
    pub const fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for ConfiguredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialStore for ConfiguredCredentials {
    fn credentials_for(&self, service_prefix: &str) -> Result<Credentials, ReviewError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(ToOwned::to_owned)
        };

        match (present(&self.username), present(&self.password)) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            _ => Err(ReviewError::NoCredentials {
                prefix: service_prefix.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConfiguredCredentials, CredentialStore, Credentials};
    use crate::review::ReviewError;

    #[test]
    fn returns_configured_pair() {
        let store = ConfiguredCredentials::new(Some("dev@example.com".to_owned()), Some("secret".to_owned()));

        let credentials = store
            .credentials_for("https://review.example.com")
            .expect("credentials should be present");

        assert_eq!(credentials, Credentials::new("dev@example.com", "secret"));
    }

    #[rstest]
    #[case::missing_username(None, Some("secret"))]
    #[case::missing_password(Some("dev@example.com"), None)]
    #[case::empty_password(Some("dev@example.com"), Some(""))]
    fn reports_missing_credentials(#[case] username: Option<&str>, #[case] password: Option<&str>) {
        let store = ConfiguredCredentials::new(
            username.map(ToOwned::to_owned),
            password.map(ToOwned::to_owned),
        );

        let error = store
            .credentials_for("https://review.example.com")
            .expect_err("incomplete credentials should be rejected");

        assert_eq!(
            error,
            ReviewError::NoCredentials {
                prefix: "https://review.example.com".to_owned()
            }
        );
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let credentials = Credentials::new("dev", "hunter2");
        let store = ConfiguredCredentials::new(Some("dev".to_owned()), Some("hunter2".to_owned()));

        assert!(!format!("{credentials:?}").contains("hunter2"));
        assert!(!format!("{store:?}").contains("hunter2"));
    }
}
