//! Unified error handling for PhoneLine billing
//!
//! Every failure a contract operation can report is a variant of
//! [`BillingError`]. All of them are programmer errors (operations invoked out
//! of order, bad inputs); none are transient, so nothing here is retried.

use chrono::NaiveDate;
use thiserror::Error;

/// Main billing error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BillingError {
    // ==================== Lifecycle Errors ====================
    #[error("No active billing cycle: new_month must be called first")]
    NoActiveCycle,

    #[error("Contract has already been cancelled")]
    ContractCancelled,

    // ==================== Validation Errors ====================
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid term: end date {end} precedes start date {start}")]
    InvalidTerm { start: NaiveDate, end: NaiveDate },

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BillingError {
    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BillingError::NoActiveCycle => "no_active_cycle",
            BillingError::ContractCancelled => "contract_cancelled",
            BillingError::InvalidMonth(_) => "invalid_month",
            BillingError::InvalidTerm { .. } => "invalid_term",
            BillingError::Config(_) => "config_error",
        }
    }
}

// ==================== From implementations ====================

impl From<config::ConfigError> for BillingError {
    fn from(err: config::ConfigError) -> Self {
        BillingError::Config(err.to_string())
    }
}
