//! Per-order, per-package shipment workflow.
//!
//! [`ShipmentOrchestrator`] drives the three lifecycle operations (register,
//! cancel, register returns) plus label retrieval. Orders are processed
//! strictly sequentially and results are partitioned by order id: a failure
//! in one order never affects another order's outcome, and every input order
//! id receives a result.
//!
//! Failure policy differs by operation, see
//! [`FailurePolicy`](crate::shipping::FailurePolicy): registration and
//! cancellation abort an order's remaining packages at the first failure,
//! return registration records the failure and continues.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::Engine as _;
use chrono::{DateTime, Days, Utc};

use crate::clients::{CourierResponse, ResponsePackage};
use crate::courier::{Courier, Party, RequestPackage};
use crate::shipping::hosts::{
    OrderRepository, PackageTypeRepository, ShippingInformationRepository,
    ShippingPackageRepository, StorageRepository,
};
use crate::shipping::models::{
    Order, PackageType, PackageUpdate, ShippingInformation, ShippingPackage, ShippingStatus,
};
use crate::shipping::results::{
    FailedReturn, OrderResult, PackageOutcome, RegisteredReturn, ReturnMetadata, ReturnsResponse,
};

/// Provider name: storage namespace and the `shipping_service_provider`
/// value on persisted shipment records.
pub const PROVIDER_NAME: &str = "SwiatPrzesylek";

/// Label access URLs stay valid for seven days.
const LABEL_URL_TTL_MINUTES: u32 = 60 * 24 * 7;

/// Placeholder declared value until the host exposes real order values.
const DECLARED_VALUE: f64 = 10.0;

/// Return labels stay available for one year.
const RETURN_AVAILABILITY_DAYS: u64 = 365;

/// Success message for registered shipments.
const SHIPMENT_REGISTERED_MESSAGE: &str = "Shipment successfully registered.";

/// Result message for orders skipped because they are already registered.
const ALREADY_REGISTERED_MESSAGE: &str = "Shipment already registered.";

/// Success message for cancelled shipments. The wording is historical and
/// expected as-is by host platform display code.
const CANCEL_SUCCESS_MESSAGE: &str = "Return successfully registered.";

/// Orchestrates the shipment lifecycle for the host platform.
///
/// Holds the courier service and the five host collaborators. All operations
/// take a slice of order ids and produce per-order results.
pub struct ShipmentOrchestrator {
    courier: Courier,
    orders: Arc<dyn OrderRepository>,
    packages: Arc<dyn ShippingPackageRepository>,
    package_types: Arc<dyn PackageTypeRepository>,
    shipping_information: Arc<dyn ShippingInformationRepository>,
    storage: Arc<dyn StorageRepository>,
}

impl ShipmentOrchestrator {
    /// Creates an orchestrator over the courier service and the host
    /// collaborators.
    #[must_use]
    pub fn new(
        courier: Courier,
        orders: Arc<dyn OrderRepository>,
        packages: Arc<dyn ShippingPackageRepository>,
        package_types: Arc<dyn PackageTypeRepository>,
        shipping_information: Arc<dyn ShippingInformationRepository>,
        storage: Arc<dyn StorageRepository>,
    ) -> Self {
        Self {
            courier,
            orders,
            packages,
            package_types,
            shipping_information,
            storage,
        }
    }

    /// Registers shipments for the given orders.
    ///
    /// Orders whose persisted status is neither unset nor open are not
    /// re-submitted; they receive a success result stating the shipment is
    /// already registered. For each qualifying order, every shipping package
    /// is registered with the courier; the first failure aborts the order's
    /// remaining packages and fails the order. Fully successful orders get
    /// their labels persisted, package rows updated, and one shipment record
    /// saved with the comma-joined external ids as transaction id.
    pub async fn register_shipments(&self, order_ids: &[i64]) -> BTreeMap<i64, OrderResult> {
        let shipment_date = Utc::now();
        let mut results = BTreeMap::new();

        for &order_id in order_ids {
            let result = match self.is_open_for_registration(order_id) {
                Ok(true) => self
                    .register_order(order_id, shipment_date)
                    .await
                    .map_or_else(OrderResult::failed, |outcomes| {
                        OrderResult::succeeded(SHIPMENT_REGISTERED_MESSAGE, outcomes)
                    }),
                Ok(false) => {
                    tracing::info!(order_id, "skipping already registered order");
                    OrderResult::succeeded(ALREADY_REGISTERED_MESSAGE, Vec::new())
                }
                Err(message) => OrderResult::failed(message),
            };

            if !result.success {
                tracing::error!(order_id, message = %result.message, "shipment registration failed");
            }
            results.insert(order_id, result);
        }

        tracing::info!(orders = order_ids.len(), "register_shipments finished");
        results
    }

    /// Cancels the registered shipments of the given orders.
    ///
    /// Each package recorded in the order's shipment record is cancelled
    /// with the courier, stopping at the first failure. The order's shipment
    /// record is reset to open regardless of the outcome.
    pub async fn delete_shipments(&self, order_ids: &[i64]) -> BTreeMap<i64, OrderResult> {
        let mut results = BTreeMap::new();

        for &order_id in order_ids {
            let result = match self.cancel_order(order_id).await {
                Ok(()) => OrderResult::succeeded(CANCEL_SUCCESS_MESSAGE, Vec::new()),
                Err(message) => {
                    tracing::error!(order_id, %message, "shipment cancellation failed");
                    OrderResult::failed(message)
                }
            };

            // The record is reset even when a cancel call failed, returning
            // the order to the open state.
            if let Err(error) = self.shipping_information.reset(order_id) {
                tracing::error!(order_id, %error, "failed to reset shipment record");
            }

            results.insert(order_id, result);
        }

        results
    }

    /// Registers return shipments for the given orders.
    ///
    /// Sender and receiver roles are swapped relative to registration: the
    /// order's delivery address ships back to the configured sender profile.
    /// A failed package is recorded and processing continues with the next
    /// package.
    pub async fn register_returns(&self, order_ids: &[i64]) -> ReturnsResponse {
        let mut response = ReturnsResponse::default();

        for &order_id in order_ids {
            let order = match self.orders.find_order_by_id(order_id) {
                Ok(order) => order,
                Err(error) => {
                    response.failed.push(FailedReturn {
                        order_id,
                        message: error.to_string(),
                    });
                    continue;
                }
            };

            // Roles swapped relative to outbound registration.
            let sender = self.receiver_party(&order);
            let receiver = self.sender_party();

            let packages = match self.packages.list_order_shipping_packages(order_id) {
                Ok(packages) => packages,
                Err(error) => {
                    response.failed.push(FailedReturn {
                        order_id,
                        message: error.to_string(),
                    });
                    continue;
                }
            };

            for package in packages {
                match self
                    .register_return_package(&order, &package, &sender, &receiver)
                    .await
                {
                    Ok(registered) => response.succeeded.push(registered),
                    Err(message) => {
                        tracing::error!(order_id, %message, "return registration failed");
                        response.failed.push(FailedReturn { order_id, message });
                    }
                }
            }
        }

        response
    }

    /// Collects the stored label documents of the given orders into one
    /// flat list.
    ///
    /// A package with a malformed label path or a missing storage object is
    /// skipped with a warning; label retrieval never fails a batch.
    pub async fn get_labels(&self, order_ids: &[i64]) -> Vec<Vec<u8>> {
        let mut labels = Vec::new();

        for &order_id in order_ids {
            let packages = match self.packages.list_order_shipping_packages(order_id) {
                Ok(packages) => packages,
                Err(error) => {
                    tracing::warn!(order_id, %error, "skipping order without readable packages");
                    continue;
                }
            };

            for package in packages {
                let Some(storage_key) = package.label_path.split('/').nth(1) else {
                    tracing::warn!(
                        order_id,
                        label_path = %package.label_path,
                        "skipping package with malformed label path"
                    );
                    continue;
                };

                match self.storage.get_object(PROVIDER_NAME, storage_key, true) {
                    Ok(object) => labels.push(object.body),
                    Err(error) => {
                        tracing::warn!(order_id, storage_key, %error, "skipping missing label object");
                    }
                }
            }
        }

        labels
    }

    /// Checks whether an order may be (re-)registered: no shipment record
    /// yet, no status, or status open.
    fn is_open_for_registration(&self, order_id: i64) -> Result<bool, String> {
        let information = self
            .shipping_information
            .get_by_order_id(order_id)
            .map_err(|error| error.to_string())?;

        Ok(match information.and_then(|info| info.shipping_status) {
            None | Some(ShippingStatus::Open) => true,
            Some(ShippingStatus::Registered) => false,
        })
    }

    /// Registers all packages of one order; aborts at the first failure.
    async fn register_order(
        &self,
        order_id: i64,
        shipment_date: DateTime<Utc>,
    ) -> Result<Vec<PackageOutcome>, String> {
        let order = self
            .orders
            .find_order_by_id(order_id)
            .map_err(|error| error.to_string())?;

        let sender = self.sender_party();
        let receiver = self.receiver_party(&order);

        let packages = self
            .packages
            .list_order_shipping_packages(order_id)
            .map_err(|error| error.to_string())?;

        let mut outcomes = Vec::new();
        for package in packages {
            let package_type = self
                .package_types
                .find_package_type_by_id(package.package_type_id)
                .map_err(|error| error.to_string())?;
            let request_package = Self::request_package(&package, &package_type, &order);

            tracing::debug!(
                order_id,
                shipping_package = package.id,
                package_type = %package_type.name,
                "registering package"
            );

            let response = self
                .courier
                .create_pre_routing(
                    Some(&package_type.name),
                    &request_package,
                    &sender,
                    &receiver,
                    &serde_json::Map::new(),
                )
                .await
                .map_err(|error| error.to_string())?;

            let response_package = first_response_package(&response)?;
            let (_, label_bytes) = decode_label(response_package)?;

            let storage_key = format!("{}.pdf", response_package.package_id);
            let stored = self
                .storage
                .upload_object(PROVIDER_NAME, &storage_key, label_bytes, true)
                .map_err(|error| error.to_string())?;
            let label_url = self
                .storage
                .get_object_url(PROVIDER_NAME, &storage_key, true, LABEL_URL_TTL_MINUTES)
                .map_err(|error| error.to_string())?;

            self.packages
                .update_order_shipping_package(
                    package.id,
                    PackageUpdate {
                        package_number: response_package.external_id.clone(),
                        label_path: stored.key.clone(),
                    },
                )
                .map_err(|error| error.to_string())?;

            tracing::info!(
                order_id,
                storage_key,
                %label_url,
                external_id = %response_package.external_id,
                "package registered"
            );

            outcomes.push(PackageOutcome {
                label_url,
                shipment_number: response_package.external_id.clone(),
                external_id: response_package.external_id.clone(),
                package_id: response_package.package_id.clone(),
                package_type: package_type.name,
            });
        }

        self.save_shipping_information(order_id, shipment_date, &outcomes)?;
        Ok(outcomes)
    }

    /// Cancels every package recorded in the order's shipment record,
    /// stopping at the first failure.
    async fn cancel_order(&self, order_id: i64) -> Result<(), String> {
        let information = self
            .shipping_information
            .get_by_order_id(order_id)
            .map_err(|error| error.to_string())?;

        let Some(information) = information else {
            tracing::info!(order_id, "no shipment record to cancel");
            return Ok(());
        };

        for outcome in &information.additional_data {
            tracing::debug!(
                order_id,
                package_id = %outcome.package_id,
                package_type = %outcome.package_type,
                "cancelling package"
            );
            self.courier
                .cancel(Some(&outcome.package_type), &outcome.package_id)
                .await
                .map_err(|error| error.to_string())?;
        }

        Ok(())
    }

    /// Registers a return for one package and persists its label.
    async fn register_return_package(
        &self,
        order: &Order,
        package: &ShippingPackage,
        sender: &Party,
        receiver: &Party,
    ) -> Result<RegisteredReturn, String> {
        let package_type = self
            .package_types
            .find_package_type_by_id(package.package_type_id)
            .map_err(|error| error.to_string())?;
        let request_package = Self::request_package(package, &package_type, order);

        let response = self
            .courier
            .create_return(Some(&package_type.name), &request_package, sender, receiver)
            .await
            .map_err(|error| error.to_string())?;

        let response_package = first_response_package(&response)?;
        let (label_base64, label_bytes) = decode_label(response_package)?;

        let storage_key = format!("return_{}.pdf", response_package.package_id);
        self.storage
            .upload_object(PROVIDER_NAME, &storage_key, label_bytes, true)
            .map_err(|error| error.to_string())?;
        let label_url = self
            .storage
            .get_object_url(PROVIDER_NAME, &storage_key, true, LABEL_URL_TTL_MINUTES)
            .map_err(|error| error.to_string())?;

        tracing::info!(
            order_id = order.id,
            storage_key,
            %label_url,
            external_id = %response_package.external_id,
            package_id = %response_package.package_id,
            "return registered"
        );

        Ok(RegisteredReturn {
            order_id: order.id,
            file_name: storage_key,
            label_base64,
            available_until: return_availability_deadline(Utc::now()),
            external_number: response_package.external_id.clone(),
            external_data: ReturnMetadata {
                return_order_id: order.id,
                url_return_pdf: label_url,
                external_id: response_package.external_id.clone(),
                package_id: response_package.package_id.clone(),
                package_type: package_type.name,
            },
        })
    }

    /// Persists the order's shipment record aggregating all package
    /// outcomes.
    fn save_shipping_information(
        &self,
        order_id: i64,
        shipment_date: DateTime<Utc>,
        outcomes: &[PackageOutcome],
    ) -> Result<(), String> {
        let transaction_id = outcomes
            .iter()
            .map(|outcome| outcome.shipment_number.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let information = ShippingInformation {
            order_id,
            transaction_id,
            shipping_service_provider: PROVIDER_NAME.to_string(),
            shipping_status: Some(ShippingStatus::Registered),
            shipping_costs: 0.0,
            additional_data: outcomes.to_vec(),
            registered_at: Utc::now(),
            shipment_at: shipment_date,
        };

        tracing::info!(order_id, transaction_id = %information.transaction_id, "saving shipment record");
        self.shipping_information
            .save(information)
            .map_err(|error| error.to_string())
    }

    /// Builds the sender side of an outbound shipment from configuration.
    fn sender_party(&self) -> Party {
        let sender = self.courier.config().sender();
        Party {
            name: sender.name.clone(),
            company: sender.company.clone(),
            address_line_1: sender.address_line_1.clone(),
            address_line_2: Some(sender.address_line_2.clone()),
            zip_code: sender.zip_code.clone(),
            city: sender.city.clone(),
            country: sender.country.clone(),
            tel: sender.tel.clone(),
        }
    }

    /// Builds the receiver side of an outbound shipment from the order's
    /// delivery address, with the configured phone fallback.
    fn receiver_party(&self, order: &Order) -> Party {
        let address = &order.delivery_address;
        let tel = address
            .phone
            .clone()
            .filter(|phone| !phone.is_empty())
            .or_else(|| {
                self.courier
                    .config()
                    .receiver_tel_fallback()
                    .map(String::from)
            })
            .unwrap_or_default();

        Party {
            name: format!("{} {}", address.first_name, address.last_name),
            company: address.company_name.clone(),
            address_line_1: format!("{} {}", address.street, address.house_number),
            address_line_2: None,
            zip_code: address.postal_code.clone(),
            city: address.town.clone(),
            country: address.country_iso.clone(),
            tel,
        }
    }

    /// Builds the request package: weight converted to kilograms, dimensions
    /// from the package type, placeholder declared value, and the order's
    /// content description.
    fn request_package(
        package: &ShippingPackage,
        package_type: &PackageType,
        order: &Order,
    ) -> RequestPackage {
        RequestPackage {
            weight: f64::from(package.weight_g) / 1000.0,
            size_l: package_type.length,
            size_w: package_type.width,
            size_d: package_type.height,
            value: DECLARED_VALUE,
            content: content_string(order),
        }
    }
}

/// Concatenates the order items' variation identifiers; falls back to the
/// order id when no identifiable content exists.
fn content_string(order: &Order) -> String {
    let identifiers: Vec<&str> = order
        .items
        .iter()
        .filter_map(|item| item.variation_model.as_deref())
        .filter(|model| !model.is_empty())
        .collect();

    if identifiers.is_empty() {
        order.id.to_string()
    } else {
        identifiers.join(",")
    }
}

/// Extracts the first per-package result of a courier response.
fn first_response_package(response: &CourierResponse) -> Result<&ResponsePackage, String> {
    response
        .response
        .as_ref()
        .and_then(|body| body.packages.first())
        .ok_or_else(|| "Courier response contained no package result.".to_string())
}

/// Decodes the first label of a package result, returning both the base64
/// form and the raw bytes.
fn decode_label(package: &ResponsePackage) -> Result<(String, Vec<u8>), String> {
    let label = package
        .labels
        .first()
        .ok_or_else(|| "Courier response contained no label document.".to_string())?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(label)
        .map_err(|error| format!("Label payload is not valid base64: {error}"))?;

    Ok((label.clone(), bytes))
}

/// Formats the one-year return-label availability deadline from the given
/// registration time: midnight, one year out.
fn return_availability_deadline(now: DateTime<Utc>) -> String {
    let deadline = now.date_naive() + Days::new(RETURN_AVAILABILITY_DAYS);
    format!("{} 00:00:00", deadline.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::models::OrderItem;
    use chrono::TimeZone as _;

    fn order_with_items(id: i64, models: &[Option<&str>]) -> Order {
        Order {
            id,
            delivery_address: crate::shipping::models::DeliveryAddress::default(),
            items: models
                .iter()
                .map(|model| OrderItem {
                    variation_model: model.map(String::from),
                })
                .collect(),
        }
    }

    #[test]
    fn test_content_string_joins_variation_identifiers() {
        let order = order_with_items(7, &[Some("SKU-1"), None, Some("SKU-2"), Some("")]);
        assert_eq!(content_string(&order), "SKU-1,SKU-2");
    }

    #[test]
    fn test_content_string_falls_back_to_order_id() {
        let order = order_with_items(4321, &[None, Some("")]);
        assert_eq!(content_string(&order), "4321");

        let empty = order_with_items(99, &[]);
        assert_eq!(content_string(&empty), "99");
    }

    #[test]
    fn test_return_availability_deadline_is_one_year_at_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 15, 30, 45).unwrap();
        assert_eq!(return_availability_deadline(now), "2027-03-01 00:00:00");
    }

    #[test]
    fn test_decode_label_rejects_invalid_base64() {
        let package = ResponsePackage {
            labels: vec!["%%%not-base64%%%".to_string()],
            ..ResponsePackage::default()
        };
        let error = decode_label(&package).unwrap_err();
        assert!(error.contains("base64"));
    }

    #[test]
    fn test_decode_label_round_trips_bytes() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"%PDF-1.4 label");
        let package = ResponsePackage {
            labels: vec![encoded.clone()],
            ..ResponsePackage::default()
        };
        let (label_base64, bytes) = decode_label(&package).unwrap();
        assert_eq!(label_base64, encoded);
        assert_eq!(bytes, b"%PDF-1.4 label");
    }

    #[test]
    fn test_first_response_package_requires_a_package() {
        let empty = CourierResponse::default();
        assert!(first_response_package(&empty).is_err());
    }
}
