//! HTTP transport for the courier API.
//!
//! [`HttpClient`] owns the reqwest clients and the base URL, nothing else.
//! Credentials are passed per call and responses are returned to the caller,
//! so one client instance is safely shareable across tasks and across
//! differently-credentialed package types.

use serde_json::Value;

use crate::clients::errors::ClientError;
use crate::clients::response::CourierResponse;
use crate::config::{BaseUrl, Credentials};

/// Maximum number of body bytes quoted in decode errors.
const DECODE_EXCERPT_LEN: usize = 200;

/// HTTP client for courier API calls and label downloads.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds no per-request state.
///
/// # Example
///
/// ```rust,ignore
/// use sp_courier::clients::HttpClient;
/// use sp_courier::{BaseUrl, Credentials};
///
/// let client = HttpClient::new(BaseUrl::new("https://api.example.com/V1")?);
/// let response = client
///     .post("courier/cancel", &Credentials::new("user", "token"), &body)
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// Client for authenticated API calls.
    client: reqwest::Client,
    /// Client for best-effort asset downloads. TLS verification is relaxed
    /// because the fixed sandbox sample asset is served with an incomplete
    /// certificate chain in some environments.
    download_client: reqwest::Client,
    base_url: BaseUrl,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given API base URL.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(base_url: BaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        let download_client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(true)
            .build()
            .expect("Failed to create download HTTP client");

        Self {
            client,
            download_client,
            base_url,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Issues an authenticated POST to `{base_url}/{endpoint}` and parses the
    /// body as a courier response.
    ///
    /// The HTTP status code is not interpreted: the courier reports failures
    /// inside the response envelope, so any parseable body is returned and
    /// left to [`CourierResponse::first_error`]. An unparseable body is a
    /// [`ClientError::Decode`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] on connection/TLS failures and
    /// [`ClientError::Decode`] when the body is not a courier response.
    pub async fn post(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        body: &Value,
    ) -> Result<CourierResponse, ClientError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, username = credentials.username(), "courier request");

        let response = self
            .client
            .post(&url)
            .basic_auth(credentials.username(), Some(credentials.token()))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!(%url, status, bytes = text.len(), "courier response");

        serde_json::from_str(&text).map_err(|source| {
            let excerpt: String = text.chars().take(DECODE_EXCERPT_LEN).collect();
            ClientError::Decode {
                status,
                reason: format!("{source}: '{excerpt}'"),
            }
        })
    }

    /// Downloads raw bytes from an arbitrary URL without authentication.
    ///
    /// Used by the sandbox transport to fetch its sample label PDF.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] on connection failures and
    /// [`ClientError::Download`] for non-success HTTP statuses.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.download_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(%url, bytes = bytes.len(), "downloaded asset");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction_keeps_base_url() {
        let client = HttpClient::new(BaseUrl::new("https://api.example.com/V1").unwrap());
        assert_eq!(client.base_url().as_ref(), "https://api.example.com/V1");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
