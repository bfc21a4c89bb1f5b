//! Client configuration.
//!
//! The SEC rejects requests that do not identify the caller, so every client
//! carries an application name and a contact email that are rendered into the
//! `User-Agent` header as `"<app name> (<email>)"`.

use crate::error::{DataError, Result};
use std::time::Duration;

/// SEC EDGAR data API base URL (submissions index)
pub const EDGAR_DATA_URL: &str = "https://data.sec.gov";

/// SEC EDGAR archive base URL (filing documents)
pub const EDGAR_ARCHIVE_URL: &str = "https://www.sec.gov";

/// Default rate limit: 10 requests per second (SEC requirement)
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_APP_NAME: &str = "Tally/0.1";
const DEFAULT_CONTACT_EMAIL: &str = "contact@example.com";

/// Environment variable holding the application name.
pub const APP_NAME_VAR: &str = "APP_NAME";
/// Environment variable holding the contact email.
pub const APP_EMAIL_VAR: &str = "APP_EMAIL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "TALLY_TIMEOUT_SECS";

/// Settings shared by every EDGAR request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Application name sent in the `User-Agent` header
    pub app_name: String,
    /// Contact email sent in the `User-Agent` header
    pub contact_email: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Minimum spacing between two requests
    pub min_interval: Duration,
    /// Base URL of the submissions API
    pub data_base_url: String,
    /// Base URL of the filing archive
    pub archive_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            min_interval: DEFAULT_MIN_INTERVAL,
            data_base_url: EDGAR_DATA_URL.to_string(),
            archive_base_url: EDGAR_ARCHIVE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or any parent) is loaded first
    /// if present. Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns `DataError::Config` if a variable holds an invalid value
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `DataError::Config` if a value is present but invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(APP_NAME_VAR).filter(|v| !v.trim().is_empty()) {
            config.app_name = name.trim().to_string();
        }
        if let Some(email) = lookup(APP_EMAIL_VAR).filter(|v| !v.trim().is_empty()) {
            config.contact_email = email.trim().to_string();
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                DataError::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_VAR, secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Override the identification sent to the SEC.
    pub fn with_identity(
        mut self,
        app_name: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        self.app_name = app_name.into();
        self.contact_email = contact_email.into();
        self
    }

    /// Override the request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the minimum interval between requests.
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Point both the submissions API and the archive at a different host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        self.data_base_url = base_url.clone();
        self.archive_base_url = base_url;
        self
    }

    /// Check the identification and timing settings.
    ///
    /// # Errors
    /// Returns `DataError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(DataError::Config("application name is empty".to_string()));
        }
        if !self.contact_email.contains('@') {
            return Err(DataError::Config(format!(
                "contact email {:?} is not an email address",
                self.contact_email
            )));
        }
        if self.timeout.is_zero() {
            return Err(DataError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// The `User-Agent` string sent with every request.
    pub fn user_agent(&self) -> String {
        format!("{} ({})", self.app_name, self.contact_email)
    }
}
