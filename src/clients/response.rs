//! Parsed courier API responses and the two-tier error search.
//!
//! Every courier operation answers with the same envelope: an overall result
//! flag, an optional structured error, and a list of per-package results. A
//! response can report failure at two levels: the request as a whole
//! (`result: "FAIL"` with an `error` body) or an individual package inside an
//! otherwise successful response. [`CourierResponse::first_error`] resolves
//! both tiers in priority order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Overall or per-package result flag.
///
/// Anything other than the two documented values is carried as `Unknown`
/// and treated as non-failing, matching the remote API's loose contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultFlag {
    /// The operation succeeded.
    #[serde(rename = "OK")]
    Ok,
    /// The operation failed.
    #[serde(rename = "FAIL")]
    Fail,
    /// An undocumented flag value.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A parsed response from the courier API.
///
/// Transient: consumed immediately after the call that produced it and never
/// persisted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourierResponse {
    /// Overall result flag.
    #[serde(default)]
    pub result: ResultFlag,

    /// Structured error body, present on request-level failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,

    /// Payload of a successful (or partially successful) request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
}

/// The top-level error body of a failed request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Error code; numeric codes are normalized to their string form.
    #[serde(default, deserialize_with = "string_or_number")]
    pub error_code: String,

    /// Human-readable error description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Nested detail groups; shape varies per endpoint, so this is kept as
    /// raw JSON and only the first element of the first group is surfaced.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

/// Payload of a courier response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Number of packages in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    /// Per-package results, in request order.
    #[serde(default)]
    pub packages: Vec<ResponsePackage>,
}

/// The result for a single package within a courier response.
///
/// Package and external ids are kept as strings: the API sends them as large
/// integers that must not go through a lossy float conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePackage {
    /// Courier-assigned package id.
    #[serde(default, deserialize_with = "string_or_number")]
    pub package_id: String,

    /// Result flag for this package.
    #[serde(default)]
    pub result: ResultFlag,

    /// Courier-side processing log; the failure detail for failed packages.
    #[serde(default)]
    pub log: String,

    /// Base64-encoded label documents.
    #[serde(default)]
    pub labels: Vec<String>,

    /// File extension of the label documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels_file_ext: Option<String>,

    /// External (carrier) tracking id.
    #[serde(default, deserialize_with = "string_or_number")]
    pub external_id: String,
}

/// Fallback description for request-level failures without a `desc` field.
const GENERIC_API_ERROR: &str = "SP API returned an error";

/// An error reported inside a courier response.
///
/// The `Display` implementation renders the operator-message template shown
/// to back-office users by the host platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("<br><br>\n=====<br>\nError message from operator: <br>\n{message} <br> \n{details}<br>\n=====")]
pub struct ApiFault {
    /// Short failure summary: `Code {code}: {desc}` for request-level
    /// failures, `Package: {package_id}` for package-level ones.
    pub message: String,
    /// Supporting detail: the first nested detail entry, or the failing
    /// package's log.
    pub details: String,
}

impl CourierResponse {
    /// Searches the response for a failure, request level first.
    ///
    /// 1. If the top-level flag is `FAIL`, the structured error body is
    ///    surfaced (with defaults for absent code/description/details).
    /// 2. Otherwise the per-package results are scanned in response order and
    ///    the first failing package is surfaced.
    ///
    /// Returns `None` when neither tier reports a failure.
    #[must_use]
    pub fn first_error(&self) -> Option<ApiFault> {
        self.request_error().or_else(|| self.package_error())
    }

    fn request_error(&self) -> Option<ApiFault> {
        if self.result != ResultFlag::Fail {
            return None;
        }

        let (code, desc, details) = self.error.as_ref().map_or_else(
            || (String::new(), GENERIC_API_ERROR.to_string(), String::new()),
            |error| {
                (
                    error.error_code.clone(),
                    error
                        .desc
                        .clone()
                        .unwrap_or_else(|| GENERIC_API_ERROR.to_string()),
                    first_detail(&error.details),
                )
            },
        );

        Some(ApiFault {
            message: format!("Code {code}: {desc}"),
            details,
        })
    }

    fn package_error(&self) -> Option<ApiFault> {
        let packages = self.response.as_ref().map(|r| r.packages.as_slice())?;
        packages
            .iter()
            .find(|package| package.result == ResultFlag::Fail)
            .map(|package| ApiFault {
                message: format!("Package: {}", package.package_id),
                details: package.log.clone(),
            })
    }
}

/// Extracts the first element of the first detail group.
///
/// Detail groups arrive either as arrays or keyed objects depending on the
/// endpoint; both are walked positionally.
fn first_detail(details: &Value) -> String {
    let first_group = match details {
        Value::Array(groups) => groups.first(),
        Value::Object(groups) => groups.values().next(),
        _ => None,
    };

    let first = match first_group {
        Some(Value::Array(items)) => items.first(),
        Some(Value::Object(items)) => items.values().next(),
        Some(scalar) => Some(scalar),
        None => None,
    };

    match first {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Deserializes a string-or-number JSON value into a `String`.
///
/// The courier sends package and external ids as bare integers large enough
/// to lose precision through `f64`; combined with `serde_json`'s
/// `arbitrary_precision` feature this keeps the exact digits.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CourierResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_all_ok_response_has_no_error() {
        let response = parse(
            r#"{
                "result": "OK",
                "response": {
                    "number": 2,
                    "packages": [
                        {"package_id": 1, "result": "OK", "log": "", "labels": [], "external_id": 11},
                        {"package_id": 2, "result": "OK", "log": "", "labels": [], "external_id": 22}
                    ]
                }
            }"#,
        );
        assert!(response.first_error().is_none());
    }

    #[test]
    fn test_request_level_error_with_full_body() {
        let response = parse(
            r#"{
                "result": "FAIL",
                "error": {
                    "error_code": 105,
                    "desc": "Invalid credentials",
                    "details": [["bad token", "second"], ["other group"]]
                }
            }"#,
        );
        let fault = response.first_error().unwrap();
        assert_eq!(fault.message, "Code 105: Invalid credentials");
        assert_eq!(fault.details, "bad token");
    }

    #[test]
    fn test_request_level_error_falls_back_to_defaults() {
        let response = parse(r#"{"result": "FAIL"}"#);
        let fault = response.first_error().unwrap();
        assert_eq!(fault.message, "Code : SP API returned an error");
        assert_eq!(fault.details, "");

        let response = parse(r#"{"result": "FAIL", "error": {"error_code": "E7"}}"#);
        let fault = response.first_error().unwrap();
        assert_eq!(fault.message, "Code E7: SP API returned an error");
    }

    #[test]
    fn test_request_level_error_wins_over_package_error() {
        let response = parse(
            r#"{
                "result": "FAIL",
                "error": {"error_code": 1, "desc": "request failed"},
                "response": {"packages": [{"package_id": 9, "result": "FAIL", "log": "pkg"}]}
            }"#,
        );
        let fault = response.first_error().unwrap();
        assert_eq!(fault.message, "Code 1: request failed");
    }

    #[test]
    fn test_first_failing_package_is_reported() {
        let response = parse(
            r#"{
                "result": "OK",
                "response": {
                    "packages": [
                        {"package_id": 1, "result": "OK", "log": ""},
                        {"package_id": 2, "result": "FAIL", "log": "no service for zip"},
                        {"package_id": 3, "result": "FAIL", "log": "later failure"}
                    ]
                }
            }"#,
        );
        let fault = response.first_error().unwrap();
        assert_eq!(fault.message, "Package: 2");
        assert_eq!(fault.details, "no service for zip");
    }

    #[test]
    fn test_large_ids_survive_parsing() {
        let response = parse(
            r#"{
                "result": "OK",
                "response": {
                    "packages": [{
                        "package_id": 9007199254740993,
                        "result": "OK",
                        "external_id": 184467440737095516150
                    }]
                }
            }"#,
        );
        let package = &response.response.unwrap().packages[0];
        assert_eq!(package.package_id, "9007199254740993");
        assert_eq!(package.external_id, "184467440737095516150");
    }

    #[test]
    fn test_string_ids_are_accepted_as_is() {
        let response = parse(
            r#"{
                "result": "OK",
                "response": {
                    "packages": [{"package_id": "PKG-1", "result": "OK", "external_id": "EXT-1"}]
                }
            }"#,
        );
        let package = &response.response.unwrap().packages[0];
        assert_eq!(package.package_id, "PKG-1");
        assert_eq!(package.external_id, "EXT-1");
    }

    #[test]
    fn test_unknown_result_flag_is_not_a_failure() {
        let response = parse(r#"{"result": "PENDING"}"#);
        assert_eq!(response.result, ResultFlag::Unknown);
        assert!(response.first_error().is_none());
    }

    #[test]
    fn test_fault_display_uses_operator_template() {
        let fault = ApiFault {
            message: "Code 1: boom".to_string(),
            details: "detail".to_string(),
        };
        let rendered = fault.to_string();
        assert!(rendered.starts_with("<br><br>\n=====<br>"));
        assert!(rendered.contains("Error message from operator:"));
        assert!(rendered.contains("Code 1: boom"));
        assert!(rendered.contains("detail"));
        assert!(rendered.ends_with("====="));
    }

    #[test]
    fn test_keyed_detail_groups_are_walked() {
        let response = parse(
            r#"{
                "result": "FAIL",
                "error": {
                    "error_code": 2,
                    "desc": "validation",
                    "details": {"receiver": {"zip_code": "invalid zip"}}
                }
            }"#,
        );
        let fault = response.first_error().unwrap();
        assert_eq!(fault.details, "invalid zip");
    }
}
