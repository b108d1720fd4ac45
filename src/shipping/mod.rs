//! Shipment lifecycle orchestration for the host order platform.
//!
//! This module sits between the host platform and the courier service:
//! [`ShipmentOrchestrator`] loads orders, packages, and package types
//! through the host collaborator traits in [`hosts`], talks to the courier
//! through [`Courier`](crate::Courier), and persists labels and shipment
//! records back into the host.
//!
//! [`OrderSelection`] covers the three request shapes host callers use to
//! address orders: a single id, a flat id list, or a wrapped `orderIds`
//! body.

pub mod hosts;
mod models;
mod orchestrator;
mod results;

pub use models::{
    DeliveryAddress, Order, OrderItem, PackageType, PackageUpdate, ShippingInformation,
    ShippingPackage, ShippingStatus, StorageObject,
};
pub use orchestrator::{ShipmentOrchestrator, PROVIDER_NAME};
pub use results::{
    FailedReturn, FailurePolicy, OrderResult, PackageOutcome, RegisteredReturn, ReturnMetadata,
    ReturnsResponse,
};

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde_json::Value;

/// The order ids addressed by one host request.
///
/// Host callers send either a bare id, a flat array of ids, or an object
/// wrapping the array under `orderIds`; all three deserialize into this
/// type.
///
/// # Example
///
/// ```rust
/// use sp_courier::OrderSelection;
///
/// let one: OrderSelection = serde_json::from_str("42").unwrap();
/// assert_eq!(one.into_order_ids(), vec![42]);
///
/// let wrapped: OrderSelection = serde_json::from_str(r#"{"orderIds":[1,2]}"#).unwrap();
/// assert_eq!(wrapped.into_order_ids(), vec![1, 2]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderSelection {
    /// A single order id.
    One(i64),
    /// A flat list of order ids.
    Many(Vec<i64>),
    /// An object wrapping the id list under `orderIds`.
    Body {
        /// The wrapped order ids.
        order_ids: Vec<i64>,
    },
}

// Deserialized through `Value` rather than `#[serde(untagged)]`: untagged
// enums with integer variants do not survive serde_json's
// arbitrary_precision mode.
impl<'de> Deserialize<'de> for OrderSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        fn id_list<E: DeError>(values: &[Value]) -> Result<Vec<i64>, E> {
            values
                .iter()
                .map(|value| {
                    value
                        .as_i64()
                        .ok_or_else(|| E::custom("expected an integer order id"))
                })
                .collect()
        }

        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Number(number) => number
                .as_i64()
                .map(Self::One)
                .ok_or_else(|| D::Error::custom("expected an integer order id")),
            Value::Array(values) => Ok(Self::Many(id_list(values)?)),
            Value::Object(map) => {
                let order_ids = map
                    .get("orderIds")
                    .and_then(Value::as_array)
                    .ok_or_else(|| D::Error::custom("expected an orderIds array"))?;
                Ok(Self::Body {
                    order_ids: id_list(order_ids)?,
                })
            }
            _ => Err(D::Error::custom(
                "expected an order id, an id array, or an orderIds object",
            )),
        }
    }
}

impl OrderSelection {
    /// Flattens the selection into a list of order ids.
    #[must_use]
    pub fn into_order_ids(self) -> Vec<i64> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) | Self::Body { order_ids: ids } => ids,
        }
    }
}

impl From<i64> for OrderSelection {
    fn from(id: i64) -> Self {
        Self::One(id)
    }
}

impl From<Vec<i64>> for OrderSelection {
    fn from(ids: Vec<i64>) -> Self {
        Self::Many(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_selection_accepts_all_three_shapes() {
        let one: OrderSelection = serde_json::from_str("7").unwrap();
        assert_eq!(one.into_order_ids(), vec![7]);

        let many: OrderSelection = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(many.into_order_ids(), vec![1, 2, 3]);

        let body: OrderSelection = serde_json::from_str(r#"{"orderIds":[5,6]}"#).unwrap();
        assert_eq!(body.into_order_ids(), vec![5, 6]);
    }

    #[test]
    fn test_order_selection_rejects_other_shapes() {
        assert!(serde_json::from_str::<OrderSelection>(r#""42""#).is_err());
        assert!(serde_json::from_str::<OrderSelection>(r#"{"ids":[1]}"#).is_err());
    }

    #[test]
    fn test_order_selection_from_impls() {
        assert_eq!(OrderSelection::from(9).into_order_ids(), vec![9]);
        assert_eq!(
            OrderSelection::from(vec![4, 2]).into_order_ids(),
            vec![4, 2]
        );
    }
}
