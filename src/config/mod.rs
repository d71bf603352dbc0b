//! Configuration loaded from environment variables and configuration files.
//!
//! The command line belongs to `git push`, so only two layers apply here,
//! lowest to highest precedence:
//!
//! 1. **Configuration file**: `.pushreview.toml` in the current directory,
//!    home directory, or XDG config directory (`pushreview/pushreview.toml`)
//! 2. **Environment variables**: `PUSHREVIEW_SERVICE_URL`,
//!    `PUSHREVIEW_USERNAME`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! service_url = "https://review.example.com/"
//! username = "dev@example.com"
//! password = "app-password"
//! timeout_seconds = 30
//! editor = "nano"
//! repositories = [
//!     "git@github.com:example/mirror.git=tools/mirrors/mirror",
//! ]
//! ```

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::command::CommandError;
use crate::review::RepositoryMapping;
use crate::service::{ConfiguredCredentials, DEFAULT_TIMEOUT_SECS};

/// Printed when the review service is not configured.
pub const SETUP_HINT: &str = concat!(
    "hint: no review service configured; pushing without a review.\n",
    "hint: set service_url, username and password in .pushreview.toml\n",
    "hint: (or PUSHREVIEW_SERVICE_URL, PUSHREVIEW_USERNAME, PUSHREVIEW_PASSWORD)."
);

/// Review-service settings.
///
/// # Environment Variables
///
/// - `PUSHREVIEW_SERVICE_URL`: review service URL prefix
/// - `PUSHREVIEW_USERNAME` / `PUSHREVIEW_PASSWORD`: basic-auth credentials
/// - `PUSHREVIEW_TIMEOUT_SECONDS`: request timeout
/// - `PUSHREVIEW_EDITOR`: editor for `--reditor`
///
/// # Example
///
/// ```no_run
/// use pushreview::PushReviewConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = PushReviewConfig::load_from_iter(["git-pushreview"])
///     .expect("failed to load configuration");
/// let service_url = config.service_url().expect("service URL should be valid");
/// ```
#[derive(Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PUSHREVIEW",
    discovery(
        dotfile_name = ".pushreview.toml",
        config_file_name = "pushreview.toml",
        app_name = "pushreview"
    )
)]
pub struct PushReviewConfig {
    /// Review service URL prefix, e.g. `https://review.example.com/`.
    ///
    /// Reviews are skipped (with a setup hint) while this is unset.
    #[ortho_config()]
    pub service_url: Option<String>,

    /// Username for basic authentication.
    #[ortho_config()]
    pub username: Option<String>,

    /// Password for basic authentication.
    #[ortho_config()]
    pub password: Option<String>,

    /// Timeout for the create-review request, in seconds.
    ///
    /// Defaults to 30; zero also selects the default.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Editor command for `--reditor`, taking precedence over `GIT_EDITOR`,
    /// `VISUAL`, and `EDITOR`.
    #[ortho_config()]
    pub editor: Option<String>,

    /// Explicit `<remote-url>=<review-repository>` mappings for push URLs
    /// that do not follow the service's `/code/<project>/<group>/<repo>`
    /// layout.
    #[ortho_config()]
    pub repositories: Vec<String>,
}

impl Default for PushReviewConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            username: None,
            password: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            editor: None,
            repositories: Vec::new(),
        }
    }
}

impl fmt::Debug for PushReviewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushReviewConfig")
            .field("service_url", &self.service_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("editor", &self.editor)
            .field("repositories", &self.repositories)
            .finish()
    }
}

impl PushReviewConfig {
    /// Returns the parsed service URL, or `None` when reviews are not
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Configuration`] when the value is not an
    /// absolute HTTP(S) URL.
    pub fn service_url(&self) -> Result<Option<Url>, CommandError> {
        let Some(raw) = self
            .service_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        else {
            return Ok(None);
        };

        let url = Url::parse(raw).map_err(|error| CommandError::Configuration {
            message: format!("service_url '{raw}' is not a valid URL: {error}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CommandError::Configuration {
                message: format!("service_url '{raw}' must use http or https"),
            });
        }
        Ok(Some(url))
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        if self.timeout_seconds == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_seconds)
        }
    }

    /// Parses the `repositories` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Configuration`] naming the first malformed
    /// entry.
    pub fn repository_mappings(&self) -> Result<Vec<RepositoryMapping>, CommandError> {
        self.repositories
            .iter()
            .map(|entry| {
                entry
                    .parse::<RepositoryMapping>()
                    .map_err(|error| CommandError::Configuration {
                        message: error.to_string(),
                    })
            })
            .collect()
    }

    /// Returns the configured credentials.
    #[must_use]
    pub fn credentials(&self) -> ConfiguredCredentials {
        ConfiguredCredentials::new(self.username.clone(), self.password.clone())
    }
}

#[cfg(test)]
mod tests;
