//! Pluggable transport strategies for courier operations.
//!
//! The environment switch of the integration is modeled as a strategy chosen
//! once at construction: [`LiveTransport`] posts to the real API, while
//! [`SandboxTransport`] synthesizes responses so the full workflow can be
//! exercised without live courier credentials or shipping cost.

use async_trait::async_trait;
use base64::Engine as _;
use rand::Rng as _;
use serde_json::Value;

use crate::clients::{
    ClientError, CourierResponse, HttpClient, ResponseBody, ResponsePackage, ResultFlag,
};
use crate::config::Credentials;

/// Endpoint registering an outbound shipment.
pub(crate) const ENDPOINT_CREATE_PRE_ROUTING: &str = "courier/create-pre-routing";
/// Endpoint registering a return shipment.
pub(crate) const ENDPOINT_CREATE_RETURN: &str = "courier/create-return";
/// Endpoint cancelling registered packages.
pub(crate) const ENDPOINT_CANCEL: &str = "courier/cancel";

/// Executes the three courier operations for a prepared body and credential
/// pair.
///
/// Implementations receive credentials per call; a transport holds no
/// account state and may serve differently-credentialed calls back to back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Registers an outbound shipment.
    async fn create_pre_routing(
        &self,
        credentials: &Credentials,
        body: Value,
    ) -> Result<CourierResponse, ClientError>;

    /// Registers a return shipment.
    async fn create_return(
        &self,
        credentials: &Credentials,
        body: Value,
    ) -> Result<CourierResponse, ClientError>;

    /// Cancels registered packages.
    async fn cancel(
        &self,
        credentials: &Credentials,
        body: Value,
    ) -> Result<CourierResponse, ClientError>;
}

/// Transport hitting the configured live API endpoint.
#[derive(Debug)]
pub struct LiveTransport {
    http: HttpClient,
}

impl LiveTransport {
    /// Creates a live transport over the given HTTP client.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for LiveTransport {
    async fn create_pre_routing(
        &self,
        credentials: &Credentials,
        body: Value,
    ) -> Result<CourierResponse, ClientError> {
        self.http
            .post(ENDPOINT_CREATE_PRE_ROUTING, credentials, &body)
            .await
    }

    async fn create_return(
        &self,
        credentials: &Credentials,
        body: Value,
    ) -> Result<CourierResponse, ClientError> {
        self.http.post(ENDPOINT_CREATE_RETURN, credentials, &body).await
    }

    async fn cancel(
        &self,
        credentials: &Credentials,
        body: Value,
    ) -> Result<CourierResponse, ClientError> {
        self.http.post(ENDPOINT_CANCEL, credentials, &body).await
    }
}

/// Transport synthesizing sandbox responses for development environments.
///
/// Shipment and return creation answer with a canned single-package response
/// whose label is a freshly downloaded sample PDF and whose package/external
/// ids are randomized. Cancellation short-circuits to an unconditional
/// success marker.
#[derive(Debug)]
pub struct SandboxTransport {
    http: HttpClient,
    sample_label_url: String,
}

impl SandboxTransport {
    /// Creates a sandbox transport fetching its sample label from the given
    /// URL.
    #[must_use]
    pub fn new(http: HttpClient, sample_label_url: impl Into<String>) -> Self {
        Self {
            http,
            sample_label_url: sample_label_url.into(),
        }
    }

    async fn dummy_create(&self) -> Result<CourierResponse, ClientError> {
        let label = self.http.download(&self.sample_label_url).await?;
        let label = base64::engine::general_purpose::STANDARD.encode(label);

        Ok(CourierResponse {
            result: ResultFlag::Ok,
            error: None,
            response: Some(ResponseBody {
                number: Some(1),
                packages: vec![ResponsePackage {
                    package_id: random_id(),
                    result: ResultFlag::Ok,
                    log: String::new(),
                    labels: vec![label],
                    labels_file_ext: Some("pdf".to_string()),
                    external_id: random_id(),
                }],
            }),
        })
    }
}

/// Generates a unique-enough sandbox id: a small random number followed by a
/// random hex suffix.
fn random_id() -> String {
    let mut rng = rand::thread_rng();
    let prefix: u32 = rng.gen_range(100..1_000_000);
    let suffix: u64 = rng.gen();
    format!("{prefix}{suffix:013x}")
}

#[async_trait]
impl Transport for SandboxTransport {
    async fn create_pre_routing(
        &self,
        _credentials: &Credentials,
        _body: Value,
    ) -> Result<CourierResponse, ClientError> {
        tracing::debug!("sandbox transport answering create-pre-routing");
        self.dummy_create().await
    }

    async fn create_return(
        &self,
        _credentials: &Credentials,
        _body: Value,
    ) -> Result<CourierResponse, ClientError> {
        tracing::debug!("sandbox transport answering create-return");
        self.dummy_create().await
    }

    async fn cancel(
        &self,
        _credentials: &Credentials,
        _body: Value,
    ) -> Result<CourierResponse, ClientError> {
        tracing::debug!("sandbox transport answering cancel");
        Ok(CourierResponse {
            result: ResultFlag::Ok,
            ..CourierResponse::default()
        })
    }
}
