//! Error types for courier API communication.
//!
//! Two layers are distinguished deliberately:
//!
//! - [`ClientError`]: transport-level failures. The request never produced a
//!   parseable courier response (network, TLS, malformed body).
//! - [`CourierError`]: what courier operations return, either a transport
//!   failure or an [`ApiFault`] found inside a well-formed response.

use thiserror::Error;

use crate::clients::response::ApiFault;

/// Transport-level failures of the courier HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure before a response body was read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed as a courier response.
    #[error("Failed to decode courier response (HTTP {status}): {reason}")]
    Decode {
        /// HTTP status of the unparseable response.
        status: u16,
        /// Parser message plus an excerpt of the offending body.
        reason: String,
    },

    /// A label/asset download returned a non-success status.
    #[error("Download of '{url}' failed with HTTP status {status}")]
    Download {
        /// The URL that was requested.
        url: String,
        /// The HTTP status that was returned.
        status: u16,
    },
}

/// Unified error type for courier operations.
#[derive(Debug, Error)]
pub enum CourierError {
    /// The courier answered, and the answer reports a failure at the
    /// request level or for one of the packages.
    #[error(transparent)]
    Api(#[from] ApiFault),

    /// The call itself failed; no courier response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] ClientError),
}
