//! The courier service: domain-specific request building over the transport.
//!
//! [`Courier`] selects the credential pair for each call from the package
//! type, shapes the operation payload, invokes the transport strategy chosen
//! at construction from the environment mode, and resolves the response's
//! two-tier error state into a `Result`.

pub mod credentials;
mod request;
mod transport;

pub use request::{Party, RequestPackage};
pub use transport::{LiveTransport, SandboxTransport, Transport};

use serde_json::{json, Map, Value};

use crate::clients::{CourierError, CourierResponse, HttpClient};
use crate::config::{CourierConfig, Environment};

/// The label format requested on every create operation.
const LABEL_TYPE: &str = "PDF";

/// High-level courier operations.
///
/// Construction picks the transport once from the configured environment;
/// every operation re-selects credentials from the package type, so calls
/// for differently-prefixed package types can be freely interleaved.
///
/// # Example
///
/// ```rust
/// use sp_courier::{Courier, CourierConfig};
///
/// let config = CourierConfig::builder().build().unwrap();
/// let courier = Courier::new(config);
/// ```
pub struct Courier {
    transport: Box<dyn Transport>,
    config: CourierConfig,
}

impl Courier {
    /// Creates a courier service with the transport implied by the
    /// configured environment: sandbox for [`Environment::Development`],
    /// live for [`Environment::Production`].
    #[must_use]
    pub fn new(config: CourierConfig) -> Self {
        let http = HttpClient::new(config.base_url().clone());
        let transport: Box<dyn Transport> = match config.environment() {
            Environment::Development => Box::new(SandboxTransport::new(
                http,
                config.sample_label_url().to_string(),
            )),
            Environment::Production => Box::new(LiveTransport::new(http)),
        };
        Self::with_transport(config, transport)
    }

    /// Creates a courier service over an explicit transport. Primarily a
    /// seam for tests and custom transports.
    #[must_use]
    pub fn with_transport(config: CourierConfig, transport: Box<dyn Transport>) -> Self {
        Self { transport, config }
    }

    /// Returns the configuration this service was built with.
    #[must_use]
    pub const fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// Registers an outbound shipment for one package.
    ///
    /// `options` carries free-form courier routing hints and is usually
    /// empty; PDF labels are always requested.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Transport`] when no response was obtained and
    /// [`CourierError::Api`] when the response reports a request-level or
    /// package-level failure.
    pub async fn create_pre_routing(
        &self,
        package_type: Option<&str>,
        package: &RequestPackage,
        sender: &Party,
        receiver: &Party,
        options: &Map<String, Value>,
    ) -> Result<CourierResponse, CourierError> {
        let credentials = credentials::for_package_type(&self.config, package_type);
        let body = json!({
            "package": package,
            "sender": sender,
            "receiver": receiver,
            "options": options,
            "options2": { "label_type": LABEL_TYPE },
        });

        let response = self
            .transport
            .create_pre_routing(&credentials, body)
            .await?;
        Self::checked(response, "create-pre-routing")
    }

    /// Registers a return shipment for one package.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::create_pre_routing`].
    pub async fn create_return(
        &self,
        package_type: Option<&str>,
        package: &RequestPackage,
        sender: &Party,
        receiver: &Party,
    ) -> Result<CourierResponse, CourierError> {
        let credentials = credentials::for_package_type(&self.config, package_type);
        let body = json!({
            "package": package,
            "sender": sender,
            "receiver": receiver,
            "options2": { "label_type": LABEL_TYPE },
        });

        let response = self.transport.create_return(&credentials, body).await?;
        Self::checked(response, "create-return")
    }

    /// Cancels a registered package.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::create_pre_routing`].
    pub async fn cancel(
        &self,
        package_type: Option<&str>,
        package_id: &str,
    ) -> Result<CourierResponse, CourierError> {
        let credentials = credentials::for_package_type(&self.config, package_type);
        let body = json!({ "id": [package_id] });

        let response = self.transport.cancel(&credentials, body).await?;
        Self::checked(response, "cancel")
    }

    /// Resolves the response's error state: a found fault becomes an `Err`,
    /// with the raw response preserved in the log for diagnostics.
    fn checked(response: CourierResponse, operation: &str) -> Result<CourierResponse, CourierError> {
        if let Some(fault) = response.first_error() {
            tracing::error!(operation, response = ?response, "courier reported a failure");
            return Err(fault.into());
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiErrorBody, ClientError, ResultFlag};
    use crate::config::Credentials;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Transport that records every call and replays a scripted response.
    #[derive(Clone)]
    struct Recording {
        response: CourierResponse,
        seen: Arc<Mutex<Vec<(String, Credentials, Value)>>>,
    }

    impl Recording {
        fn new(response: CourierResponse) -> Self {
            Self {
                response,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn record(&self, op: &str, credentials: &Credentials, body: Value) {
            self.seen
                .lock()
                .unwrap()
                .push((op.to_string(), credentials.clone(), body));
        }
    }

    #[async_trait]
    impl Transport for Recording {
        async fn create_pre_routing(
            &self,
            credentials: &Credentials,
            body: Value,
        ) -> Result<CourierResponse, ClientError> {
            self.record("pre-routing", credentials, body);
            Ok(self.response.clone())
        }

        async fn create_return(
            &self,
            credentials: &Credentials,
            body: Value,
        ) -> Result<CourierResponse, ClientError> {
            self.record("return", credentials, body);
            Ok(self.response.clone())
        }

        async fn cancel(
            &self,
            credentials: &Credentials,
            body: Value,
        ) -> Result<CourierResponse, ClientError> {
            self.record("cancel", credentials, body);
            Ok(self.response.clone())
        }
    }

    fn config() -> CourierConfig {
        CourierConfig::builder()
            .credentials(Credentials::new("user-a", "token-a"))
            .credentials_b(Credentials::new("user-b", "token-b"))
            .build()
            .unwrap()
    }

    fn ok_response() -> CourierResponse {
        CourierResponse {
            result: ResultFlag::Ok,
            ..CourierResponse::default()
        }
    }

    #[tokio::test]
    async fn test_create_pre_routing_routes_credentials_and_requests_pdf() {
        let recording = Recording::new(ok_response());
        let courier = Courier::with_transport(config(), Box::new(recording.clone()));

        courier
            .create_pre_routing(
                Some("SPB-Maxi"),
                &RequestPackage::default(),
                &Party::default(),
                &Party::default(),
                &Map::new(),
            )
            .await
            .unwrap();

        let seen = recording.seen.lock().unwrap();
        let (op, credentials, body) = &seen[0];
        assert_eq!(op, "pre-routing");
        assert_eq!(credentials.username(), "user-b");
        assert_eq!(body["options2"]["label_type"], "PDF");
        assert!(body["package"].is_object());
        assert!(body["options"].is_object());
    }

    #[tokio::test]
    async fn test_create_return_omits_options() {
        let recording = Recording::new(ok_response());
        let courier = Courier::with_transport(config(), Box::new(recording.clone()));

        courier
            .create_return(
                None,
                &RequestPackage::default(),
                &Party::default(),
                &Party::default(),
            )
            .await
            .unwrap();

        let seen = recording.seen.lock().unwrap();
        let (op, credentials, body) = &seen[0];
        assert_eq!(op, "return");
        assert_eq!(credentials.username(), "user-a");
        assert_eq!(body["options2"]["label_type"], "PDF");
        assert!(body.get("options").is_none());
    }

    #[tokio::test]
    async fn test_cancel_body_wraps_id_in_array() {
        let recording = Recording::new(ok_response());
        let courier = Courier::with_transport(config(), Box::new(recording.clone()));

        courier.cancel(Some("SPB-Maxi"), "12345").await.unwrap();

        let seen = recording.seen.lock().unwrap();
        let (op, credentials, body) = &seen[0];
        assert_eq!(op, "cancel");
        assert_eq!(credentials.username(), "user-b");
        assert_eq!(body["id"], serde_json::json!(["12345"]));
    }

    #[tokio::test]
    async fn test_fault_in_response_becomes_api_error() {
        let failing = CourierResponse {
            result: ResultFlag::Fail,
            error: Some(ApiErrorBody {
                error_code: "9".to_string(),
                desc: Some("rejected".to_string()),
                details: Value::Null,
            }),
            response: None,
        };
        let courier = Courier::with_transport(config(), Box::new(Recording::new(failing)));

        let result = courier.cancel(None, "1").await;
        match result {
            Err(CourierError::Api(fault)) => assert_eq!(fault.message, "Code 9: rejected"),
            other => panic!("expected api fault, got {other:?}"),
        }
    }
}
