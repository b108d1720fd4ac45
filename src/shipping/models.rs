//! Host-side domain models crossing the collaborator boundary.
//!
//! These mirror the order-management platform's records as far as this
//! integration reads or writes them. They are plain data; ownership and
//! persistence stay with the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shipping::results::PackageOutcome;

/// An order as far as shipment registration needs it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Host order id.
    pub id: i64,

    /// The delivery address of the order.
    pub delivery_address: DeliveryAddress,

    /// Order line items; used to build the declared content description.
    pub items: Vec<OrderItem>,
}

/// A delivery address.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Recipient first name.
    pub first_name: String,

    /// Recipient last name.
    pub last_name: String,

    /// Company name, empty for private recipients.
    pub company_name: String,

    /// Street name.
    pub street: String,

    /// House number.
    pub house_number: String,

    /// Postal code.
    pub postal_code: String,

    /// City or town.
    pub town: String,

    /// Country code (ISO 3166-1 alpha-2).
    pub country_iso: String,

    /// Phone number, if the customer provided one.
    pub phone: Option<String>,
}

/// One order line item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Identifier of the purchased variation, if any.
    pub variation_model: Option<String>,
}

/// One physical parcel of an order's shipment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingPackage {
    /// Host id of this package row.
    pub id: i64,

    /// Id of the package type this parcel ships under.
    pub package_type_id: i64,

    /// Weight in grams.
    pub weight_g: u32,

    /// Stored external tracking number; set after registration.
    pub package_number: String,

    /// Stored label reference (`namespace/key`); set after registration.
    pub label_path: String,
}

/// Fields written back to a shipping package after registration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageUpdate {
    /// The courier-assigned external tracking number.
    pub package_number: String,

    /// The storage reference of the uploaded label.
    pub label_path: String,
}

/// A carrier-defined shipping product.
///
/// The first four characters of `name` select the API credential pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageType {
    /// Host id of the package type.
    pub id: i64,

    /// Identifier with the 4-character routing prefix (`SPA-`, ...).
    pub name: String,

    /// Length in centimeters.
    pub length: f64,

    /// Width in centimeters.
    pub width: f64,

    /// Height in centimeters.
    pub height: f64,
}

/// Persisted shipping status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingStatus {
    /// Not yet registered with the courier (or reset after cancellation).
    Open,
    /// Registered with the courier.
    Registered,
}

/// The persisted shipment record of an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingInformation {
    /// The order this record belongs to.
    pub order_id: i64,

    /// External transaction id; comma-joined when the order shipped in
    /// several packages.
    pub transaction_id: String,

    /// Name of the shipping service provider.
    pub shipping_service_provider: String,

    /// Current shipping status; `None` for never-registered orders.
    pub shipping_status: Option<ShippingStatus>,

    /// Shipping cost booked on registration.
    pub shipping_costs: f64,

    /// Per-package outcome records from registration; read back by
    /// cancellation.
    pub additional_data: Vec<PackageOutcome>,

    /// When the shipment was registered.
    pub registered_at: DateTime<Utc>,

    /// The shipment date.
    pub shipment_at: DateTime<Utc>,
}

/// A stored binary object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorageObject {
    /// Storage reference of the object (`namespace/key`).
    pub key: String,

    /// Raw object bytes.
    pub body: Vec<u8>,
}
