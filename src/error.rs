//! Error types for crate configuration.
//!
//! Configuration constructors return `Result<T, ConfigError>` so that an
//! invalid setup fails at build time rather than on the first courier call.

use thiserror::Error;

/// Errors that can occur while building a [`crate::CourierConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The courier API base URL is not a usable http(s) URL.
    #[error("Invalid base URL '{url}'. Expected an absolute http(s) URL such as 'https://api.example.com/V1'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The sandbox sample-label URL is not a usable http(s) URL.
    #[error("Invalid sample label URL '{url}'. Expected an absolute http(s) URL pointing at a PDF asset.")]
    InvalidSampleLabelUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
