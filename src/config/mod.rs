//! Configuration types for the courier integration.
//!
//! The main types in this module are:
//!
//! - [`CourierConfig`]: all settings the integration needs: credential
//!   variants, environment mode, sender identity, and endpoint URLs
//! - [`CourierConfigBuilder`]: a builder for constructing [`CourierConfig`]
//! - [`Credentials`]: an API username/token pair with masked debug output
//! - [`Environment`]: development (sandbox) vs. production mode
//! - [`SenderProfile`]: the configured shipment sender identity
//!
//! # Example
//!
//! ```rust
//! use sp_courier::{CourierConfig, Credentials, Environment, SenderProfile};
//!
//! let config = CourierConfig::builder()
//!     .credentials(Credentials::new("merchant", "token"))
//!     .environment(Environment::Production)
//!     .sender(SenderProfile {
//!         name: "Warehouse".to_string(),
//!         city: "Berlin".to_string(),
//!         ..SenderProfile::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.environment(), Environment::Production);
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, Credentials};

use crate::error::ConfigError;

/// Default courier API base URL (production endpoint, API version 1).
pub const DEFAULT_BASE_URL: &str = "https://api.swiatprzesylek.pl/V1";

/// Default sample PDF fetched by the sandbox transport and re-used as a
/// shipping label when no live courier account is available.
pub const DEFAULT_SAMPLE_LABEL_URL: &str =
    "https://www.dhl.com/content/dam/downloads/g0/express/customs_regulations_china/waybill_sample.pdf";

/// Execution environment for outbound courier calls.
///
/// In [`Environment::Development`] shipment and return creation are answered
/// by a synthetic sandbox response and cancellation short-circuits to
/// success, so the full workflow can be exercised without live credentials
/// or shipping cost. [`Environment::Production`] talks to the real API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Sandbox mode; no live courier calls for create/cancel operations.
    #[default]
    Development,
    /// Live mode; all operations hit the configured API endpoint.
    Production,
}

/// The configured sender identity used on outbound shipments.
///
/// On returns the roles are swapped: this profile becomes the logical
/// receiver and the order's delivery address the sender.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SenderProfile {
    /// Contact name.
    pub name: String,
    /// Company name.
    pub company: String,
    /// First address line (street and number).
    pub address_line_1: String,
    /// Second address line (suite, unit, ...).
    pub address_line_2: String,
    /// Postal code.
    pub zip_code: String,
    /// City or town.
    pub city: String,
    /// Country code.
    pub country: String,
    /// Phone number.
    pub tel: String,
}

/// Configuration for the courier integration.
///
/// Holds the three credential variants selected by package-type prefix, the
/// environment switch, the sender identity, and endpoint URLs.
///
/// `CourierConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct CourierConfig {
    credentials: Credentials,
    credentials_b: Credentials,
    credentials_c: Credentials,
    environment: Environment,
    sender: SenderProfile,
    receiver_tel_fallback: Option<String>,
    base_url: BaseUrl,
    sample_label_url: String,
}

// Verify CourierConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CourierConfig>();
};

impl CourierConfig {
    /// Creates a new builder for constructing a `CourierConfig`.
    #[must_use]
    pub fn builder() -> CourierConfigBuilder {
        CourierConfigBuilder::new()
    }

    /// Returns the default (`SPA-`) credential pair.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the `SPB-` credential pair.
    #[must_use]
    pub const fn credentials_b(&self) -> &Credentials {
        &self.credentials_b
    }

    /// Returns the `SPC-` credential pair.
    #[must_use]
    pub const fn credentials_c(&self) -> &Credentials {
        &self.credentials_c
    }

    /// Returns the configured environment mode.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the configured sender identity.
    #[must_use]
    pub const fn sender(&self) -> &SenderProfile {
        &self.sender
    }

    /// Returns the fallback phone number used when a delivery address has
    /// none.
    #[must_use]
    pub fn receiver_tel_fallback(&self) -> Option<&str> {
        self.receiver_tel_fallback.as_deref()
    }

    /// Returns the courier API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the URL of the sample PDF used by the sandbox transport.
    #[must_use]
    pub fn sample_label_url(&self) -> &str {
        &self.sample_label_url
    }
}

/// Builder for constructing [`CourierConfig`] instances.
///
/// All fields are optional. Unset credential variants resolve to empty
/// pairs; credential routing never fails, and the remote API reports
/// authentication problems as request-level errors.
///
/// # Defaults
///
/// - `environment`: [`Environment::Development`]
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `sample_label_url`: [`DEFAULT_SAMPLE_LABEL_URL`]
/// - credential variants, sender profile: empty
/// - `receiver_tel_fallback`: `None`
#[derive(Debug, Default)]
pub struct CourierConfigBuilder {
    credentials: Option<Credentials>,
    credentials_b: Option<Credentials>,
    credentials_c: Option<Credentials>,
    environment: Option<Environment>,
    sender: Option<SenderProfile>,
    receiver_tel_fallback: Option<String>,
    base_url: Option<String>,
    sample_label_url: Option<String>,
}

impl CourierConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default (`SPA-`) credential pair.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the `SPB-` credential pair.
    #[must_use]
    pub fn credentials_b(mut self, credentials: Credentials) -> Self {
        self.credentials_b = Some(credentials);
        self
    }

    /// Sets the `SPC-` credential pair.
    #[must_use]
    pub fn credentials_c(mut self, credentials: Credentials) -> Self {
        self.credentials_c = Some(credentials);
        self
    }

    /// Sets the environment mode.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the sender identity used on outbound shipments.
    #[must_use]
    pub fn sender(mut self, sender: SenderProfile) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Sets the fallback phone number for delivery addresses without one.
    #[must_use]
    pub fn receiver_tel_fallback(mut self, tel: impl Into<String>) -> Self {
        self.receiver_tel_fallback = Some(tel.into());
        self
    }

    /// Overrides the courier API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Overrides the sandbox sample-label URL. Useful for tests and offline
    /// development environments without access to the public sample asset.
    #[must_use]
    pub fn sample_label_url(mut self, url: impl Into<String>) -> Self {
        self.sample_label_url = Some(url.into());
        self
    }

    /// Builds the [`CourierConfig`], validating endpoint URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] or
    /// [`ConfigError::InvalidSampleLabelUrl`] if an overridden URL is not an
    /// absolute http(s) URL.
    pub fn build(self) -> Result<CourierConfig, ConfigError> {
        let base_url = BaseUrl::new(self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;

        let sample_label_url = self
            .sample_label_url
            .unwrap_or_else(|| DEFAULT_SAMPLE_LABEL_URL.to_string());
        if BaseUrl::new(sample_label_url.clone()).is_err() {
            return Err(ConfigError::InvalidSampleLabelUrl {
                url: sample_label_url,
            });
        }

        Ok(CourierConfig {
            credentials: self.credentials.unwrap_or_default(),
            credentials_b: self.credentials_b.unwrap_or_default(),
            credentials_c: self.credentials_c.unwrap_or_default(),
            environment: self.environment.unwrap_or_default(),
            sender: self.sender.unwrap_or_default(),
            receiver_tel_fallback: self.receiver_tel_fallback,
            base_url,
            sample_label_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = CourierConfig::builder().build().unwrap();

        assert_eq!(config.environment(), Environment::Development);
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.sample_label_url(), DEFAULT_SAMPLE_LABEL_URL);
        assert!(config.credentials().is_empty());
        assert!(config.credentials_b().is_empty());
        assert!(config.credentials_c().is_empty());
        assert!(config.receiver_tel_fallback().is_none());
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = CourierConfig::builder().base_url("nonsense").build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_builder_rejects_invalid_sample_label_url() {
        let result = CourierConfig::builder()
            .sample_label_url("nonsense")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSampleLabelUrl { .. })
        ));
    }

    #[test]
    fn test_builder_with_all_fields() {
        let config = CourierConfig::builder()
            .credentials(Credentials::new("a", "ta"))
            .credentials_b(Credentials::new("b", "tb"))
            .credentials_c(Credentials::new("c", "tc"))
            .environment(Environment::Production)
            .sender(SenderProfile {
                name: "Warehouse".to_string(),
                ..SenderProfile::default()
            })
            .receiver_tel_fallback("+48 000 000 000")
            .base_url("https://api.example.com/V1/")
            .build()
            .unwrap();

        assert_eq!(config.credentials().username(), "a");
        assert_eq!(config.credentials_b().username(), "b");
        assert_eq!(config.credentials_c().username(), "c");
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.sender().name, "Warehouse");
        assert_eq!(config.receiver_tel_fallback(), Some("+48 000 000 000"));
        assert_eq!(config.base_url().as_ref(), "https://api.example.com/V1");
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = CourierConfig::builder()
            .credentials(Credentials::new("user", "secret-token"))
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.credentials(), config.credentials());

        // Debug output must not leak the token
        let debug = format!("{config:?}");
        assert!(debug.contains("CourierConfig"));
        assert!(!debug.contains("secret-token"));
    }
}
