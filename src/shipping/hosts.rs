//! Collaborator traits implemented by the host platform.
//!
//! The orchestrator never persists anything itself: orders, packages,
//! package types, shipment records, and binary objects are all owned by the
//! host and reached through these traits. Implementations must be
//! `Send + Sync`; the orchestrator holds them behind `Arc<dyn ...>`.

use thiserror::Error;

use crate::shipping::models::{
    Order, PackageType, PackageUpdate, ShippingInformation, ShippingPackage, StorageObject,
};

/// An error reported by a host collaborator.
///
/// The orchestrator does not interpret host failures beyond attaching their
/// message to the affected order's result, so a single opaque kind suffices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(String);

impl HostError {
    /// Creates a host error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type of host collaborator calls.
pub type HostResult<T> = Result<T, HostError>;

/// Read access to orders.
pub trait OrderRepository: Send + Sync {
    /// Loads an order with its delivery address and line items.
    fn find_order_by_id(&self, order_id: i64) -> HostResult<Order>;
}

/// Access to an order's shipping packages.
pub trait ShippingPackageRepository: Send + Sync {
    /// Lists the shipping packages of an order.
    fn list_order_shipping_packages(&self, order_id: i64) -> HostResult<Vec<ShippingPackage>>;

    /// Writes the tracking number and label reference back to a package.
    fn update_order_shipping_package(
        &self,
        shipping_package_id: i64,
        update: PackageUpdate,
    ) -> HostResult<()>;
}

/// Read access to package types.
pub trait PackageTypeRepository: Send + Sync {
    /// Loads a package type by id.
    fn find_package_type_by_id(&self, package_type_id: i64) -> HostResult<PackageType>;
}

/// Access to persisted shipment records.
pub trait ShippingInformationRepository: Send + Sync {
    /// Loads the shipment record of an order, if one exists.
    fn get_by_order_id(&self, order_id: i64) -> HostResult<Option<ShippingInformation>>;

    /// Persists a shipment record.
    fn save(&self, information: ShippingInformation) -> HostResult<()>;

    /// Resets an order's shipment record to its open state.
    fn reset(&self, order_id: i64) -> HostResult<()>;
}

/// Binary object storage for label documents.
pub trait StorageRepository: Send + Sync {
    /// Stores an object and returns its storage reference.
    fn upload_object(
        &self,
        namespace: &str,
        key: &str,
        body: Vec<u8>,
        private: bool,
    ) -> HostResult<StorageObject>;

    /// Loads a stored object.
    fn get_object(&self, namespace: &str, key: &str, private: bool) -> HostResult<StorageObject>;

    /// Returns a time-limited access URL for a stored object.
    fn get_object_url(
        &self,
        namespace: &str,
        key: &str,
        private: bool,
        ttl_minutes: u32,
    ) -> HostResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_displays_its_message() {
        let error = HostError::new("row not found");
        assert_eq!(error.to_string(), "row not found");
        let _: &dyn std::error::Error = &error;
    }
}
