//! Validated newtype wrappers and credential types for configuration values.

use crate::error::ConfigError;
use std::fmt;

/// An API credential pair (username + token) for HTTP Basic authentication
/// against the courier API.
///
/// Empty credentials are valid by design: credential selection never fails,
/// and authentication problems surface as request-level errors from the
/// remote API instead. The token is masked in `Debug` output so credentials
/// can be logged alongside request diagnostics without leaking secrets.
///
/// # Example
///
/// ```rust
/// use sp_courier::Credentials;
///
/// let creds = Credentials::new("merchant-a", "s3cret");
/// assert_eq!(creds.username(), "merchant-a");
/// assert_eq!(format!("{creds:?}"), "Credentials { username: \"merchant-a\", token: **** }");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    token: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Returns the API username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the API token used as the Basic-auth password.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns `true` when both username and token are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.token.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &format_args!("****"))
            .finish()
    }
}

/// A validated absolute http(s) URL.
///
/// Used for the courier API base URL and the sandbox sample-label URL. The
/// check is deliberately shallow (scheme + non-empty host part); full URL
/// validation is left to the HTTP layer at request time.
///
/// # Example
///
/// ```rust
/// use sp_courier::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/V1").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/V1");
///
/// assert!(BaseUrl::new("ftp://api.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL. A trailing slash is trimmed so
    /// endpoint paths can always be joined with a single `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is not an
    /// absolute http(s) URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() => Ok(Self(trimmed.to_string())),
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
