//! PhoneLine Billing
//!
//! Monthly billing for phone line contracts. This crate re-exports the core
//! models and contract policies and provides tracing setup for drivers.

use std::env;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use phoneline_contracts::{
    Contract, ContractBase, CycleState, MtmContract, PrepaidContract, TermContract,
};
pub use phoneline_core::{
    config, models, Bill, BillSummary, BillingError, BillingResult, Call, ContractKind,
    TariffConfig,
};

/// Initialize tracing/logging
///
/// Honors `RUST_LOG`, falling back to `LOG_LEVEL` (default `info`) for the
/// billing crates. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    dotenvy::dotenv().ok();

    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "phoneline_billing={},phoneline_core={},phoneline_contracts={}",
            log_level, log_level, log_level
        ))
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .try_init()
        .is_ok();

    if installed {
        info!(
            "PhoneLine billing v{} tracing initialized at level {}",
            env!("CARGO_PKG_VERSION"),
            log_level
        );
    }
}
