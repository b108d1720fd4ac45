//! HTTP client layer for the courier API.
//!
//! This module provides the low-level transport: authenticated JSON POSTs,
//! best-effort binary downloads, the parsed response envelope, and the
//! two-tier error search over it.

mod errors;
mod http_client;
mod response;

pub use errors::{ClientError, CourierError};
pub use http_client::HttpClient;
pub use response::{
    ApiErrorBody, ApiFault, CourierResponse, ResponseBody, ResponsePackage, ResultFlag,
};
