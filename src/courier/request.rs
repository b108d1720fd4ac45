//! Outbound request payload types.
//!
//! These structs mirror the wire shape of the courier's create operations.
//! They are built fresh for every package and never persisted.

use serde::Serialize;

/// A shipment party: the sender or receiver of a parcel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Party {
    /// Contact name.
    pub name: String,

    /// Company name.
    pub company: String,

    /// First address line (street and number).
    pub address_line_1: String,

    /// Second address line; only the configured sender carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,

    /// Postal code.
    pub zip_code: String,

    /// City or town.
    pub city: String,

    /// Country code (ISO 3166-1 alpha-2).
    pub country: String,

    /// Phone number.
    pub tel: String,
}

/// Physical attributes and declared content of one parcel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RequestPackage {
    /// Weight in kilograms.
    pub weight: f64,

    /// Length in centimeters.
    pub size_l: f64,

    /// Width in centimeters.
    pub size_w: f64,

    /// Depth/height in centimeters.
    pub size_d: f64,

    /// Declared value of the contents.
    pub value: f64,

    /// Declared content description.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_serializes_to_wire_field_names() {
        let party = Party {
            name: "Jane Doe".to_string(),
            company: "ACME".to_string(),
            address_line_1: "Main St 1".to_string(),
            address_line_2: None,
            zip_code: "00-001".to_string(),
            city: "Warsaw".to_string(),
            country: "PL".to_string(),
            tel: "+48 123".to_string(),
        };

        let value = serde_json::to_value(&party).unwrap();
        assert_eq!(value["address_line_1"], "Main St 1");
        assert_eq!(value["zip_code"], "00-001");
        assert!(value.get("address_line_2").is_none());
    }

    #[test]
    fn test_package_serializes_dimensions_and_content() {
        let package = RequestPackage {
            weight: 1.25,
            size_l: 30.0,
            size_w: 20.0,
            size_d: 10.0,
            value: 10.0,
            content: "SKU-1,SKU-2".to_string(),
        };

        let value = serde_json::to_value(&package).unwrap();
        assert_eq!(value["weight"], 1.25);
        assert_eq!(value["size_l"], 30.0);
        assert_eq!(value["content"], "SKU-1,SKU-2");
    }
}
