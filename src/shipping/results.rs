//! Result types returned to the host platform by the orchestrator.

use serde::{Deserialize, Serialize};

/// How an operation reacts to a package-level failure inside one order.
///
/// Shipment registration and cancellation abort the order's remaining
/// packages at the first failure; return registration records the failure
/// and continues. The policies are intentionally distinct per operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop processing the order's remaining packages at the first failure.
    Abort,
    /// Record the failure and continue with the next package.
    Continue,
}

/// Per-order outcome of a register or cancel call.
///
/// Serialized field names follow the host platform's result contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    /// Whether the operation succeeded for this order.
    pub success: bool,

    /// Status message: a fixed success phrase or the formatted courier /
    /// transport / storage failure.
    pub message: String,

    /// Whether a new package number was assigned. Always `false`; carried
    /// for host contract compatibility.
    #[serde(rename = "newPackagenumber")]
    pub new_package_number: bool,

    /// Per-package outcome records; empty on failure.
    pub packages: Vec<PackageOutcome>,
}

impl OrderResult {
    /// Builds a successful result.
    #[must_use]
    pub fn succeeded(message: impl Into<String>, packages: Vec<PackageOutcome>) -> Self {
        Self {
            success: true,
            message: message.into(),
            new_package_number: false,
            packages,
        }
    }

    /// Builds a failed result with no package outcomes.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            new_package_number: false,
            packages: Vec::new(),
        }
    }
}

/// Outcome of one successfully registered package.
///
/// Also persisted verbatim as the shipment record's additional data, which
/// is what cancellation later reads back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOutcome {
    /// Time-limited URL of the stored label document.
    pub label_url: String,

    /// Tracking number reported to the host.
    pub shipment_number: String,

    /// Courier-assigned external id.
    pub external_id: String,

    /// Courier-assigned package id.
    pub package_id: String,

    /// Name of the package type the parcel was registered under.
    pub package_type: String,
}

/// Aggregate response of a return-registration call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnsResponse {
    /// Successfully registered returns, across all orders.
    pub succeeded: Vec<RegisteredReturn>,

    /// Failed return registrations, across all orders.
    pub failed: Vec<FailedReturn>,
}

/// A return registration that failed for one package of an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FailedReturn {
    /// The order the return belongs to.
    pub order_id: i64,

    /// The formatted failure message.
    pub message: String,
}

/// A successfully registered return for one package.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisteredReturn {
    /// The order the return belongs to.
    pub order_id: i64,

    /// Storage file name of the return label (`return_{packageId}.pdf`).
    pub file_name: String,

    /// The return label document, base64-encoded.
    pub label_base64: String,

    /// Deadline until which the return label stays usable
    /// (`YYYY-MM-DD HH:MM:SS`, one year from registration).
    pub available_until: String,

    /// Courier-assigned external tracking number.
    pub external_number: String,

    /// Structured metadata bundle handed to the host.
    pub external_data: ReturnMetadata,
}

/// Metadata describing a registered return.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetadata {
    /// The order the return was registered for.
    pub return_order_id: i64,

    /// Time-limited URL of the stored return label.
    pub url_return_pdf: String,

    /// Courier-assigned external id.
    pub external_id: String,

    /// Courier-assigned package id.
    pub package_id: String,

    /// Name of the package type the return was registered under.
    pub package_type: String,
}
