//! # Świat Przesyłek Courier Integration
//!
//! A Rust integration between an order-management platform and the Świat
//! Przesyłek parcel API: shipment registration, cancellation, return
//! registration, and label retrieval.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`CourierConfig`] and [`CourierConfigBuilder`]
//! - Credential routing by package-type prefix (`SPA-` / `SPB-` / `SPC-`)
//! - An async HTTP client for the courier's JSON-over-POST API
//! - A two-tier error model separating transport failures from courier-reported
//!   faults
//! - A sandbox transport that answers create/cancel operations synthetically,
//!   so the full workflow runs without live credentials
//! - A shipment orchestrator driving per-order, per-package registration,
//!   cancellation, and returns against host-platform collaborators
//!
//! ## Quick Start
//!
//! ```rust
//! use sp_courier::{Courier, CourierConfig, Credentials, Environment};
//!
//! // Create configuration using the builder pattern
//! let config = CourierConfig::builder()
//!     .credentials(Credentials::new("merchant", "api-token"))
//!     .environment(Environment::Development)
//!     .build()
//!     .unwrap();
//!
//! // The courier service picks its transport from the environment
//! let courier = Courier::new(config);
//! ```
//!
//! ## Registering Shipments
//!
//! The orchestrator connects the courier service to the host platform
//! through collaborator traits ([`shipping::hosts`]):
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sp_courier::{Courier, CourierConfig, ShipmentOrchestrator};
//!
//! let courier = Courier::new(CourierConfig::builder().build()?);
//! let orchestrator = ShipmentOrchestrator::new(
//!     courier,
//!     orders,                // Arc<dyn OrderRepository>
//!     packages,              // Arc<dyn ShippingPackageRepository>
//!     package_types,         // Arc<dyn PackageTypeRepository>
//!     shipping_information,  // Arc<dyn ShippingInformationRepository>
//!     storage,               // Arc<dyn StorageRepository>
//! );
//!
//! let results = orchestrator.register_shipments(&[1001, 1002]).await;
//! for (order_id, result) in &results {
//!     println!("{order_id}: {} ({})", result.success, result.message);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Stateless credential routing**: Every courier call re-selects its
//!   credential pair from the package type; no mutable client state
//! - **Fail-fast validation**: Endpoint URLs validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Order isolation**: A failure in one order never affects another
//!   order's outcome

pub mod clients;
pub mod config;
pub mod courier;
pub mod error;
pub mod shipping;

// Re-export public types at crate root for convenience
pub use config::{
    BaseUrl, CourierConfig, CourierConfigBuilder, Credentials, Environment, SenderProfile,
};
pub use error::ConfigError;

// Re-export HTTP client and response types
pub use clients::{
    ApiErrorBody, ApiFault, ClientError, CourierError, CourierResponse, HttpClient, ResponseBody,
    ResponsePackage, ResultFlag,
};

// Re-export courier service types
pub use courier::{Courier, LiveTransport, Party, RequestPackage, SandboxTransport, Transport};

// Re-export orchestrator types
pub use shipping::{
    FailedReturn, FailurePolicy, OrderResult, OrderSelection, PackageOutcome, RegisteredReturn,
    ReturnMetadata, ReturnsResponse, ShipmentOrchestrator, ShippingInformation, ShippingStatus,
};
