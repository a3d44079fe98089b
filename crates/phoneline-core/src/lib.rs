//! PhoneLine Billing Core Library
//!
//! This crate provides the foundational types and error handling for
//! PhoneLine billing. It includes:
//!
//! - Domain models (Bill, Call, ContractKind)
//! - Tariff configuration with file and environment overrides
//! - Unified error handling with stable error codes

pub mod config;
pub mod error;
pub mod models;

pub use config::TariffConfig;
pub use error::BillingError;
pub use models::{Bill, BillSummary, Call, ContractKind};

/// Result type alias using BillingError
pub type BillingResult<T> = Result<T, BillingError>;
