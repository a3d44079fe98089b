//! Tariff configuration
//!
//! This module provides centralized tariff management using the `config` crate.
//! Fees, rates and allotments default to the standard price list and can be
//! overridden from config files and environment variables.

use config::{Config, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::error::BillingError;

/// Complete tariff table applied by contracts
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct TariffConfig {
    #[serde(default)]
    pub mtm: MtmTariff,

    #[serde(default)]
    pub term: TermTariff,

    #[serde(default)]
    pub prepaid: PrepaidTariff,
}

/// Month-to-month pricing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MtmTariff {
    /// Flat fee charged every cycle
    #[serde(default = "default_mtm_monthly_fee")]
    pub monthly_fee: Decimal,

    /// Cost per billed minute
    #[serde(default = "default_mtm_minute_rate")]
    pub minute_rate: Decimal,
}

fn default_mtm_monthly_fee() -> Decimal {
    Decimal::new(5000, 2)
}

fn default_mtm_minute_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Fixed-term pricing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TermTariff {
    /// Flat fee charged every cycle
    #[serde(default = "default_term_monthly_fee")]
    pub monthly_fee: Decimal,

    /// One-time deposit charged in the first cycle
    #[serde(default = "default_term_deposit")]
    pub deposit: Decimal,

    /// Included minutes per cycle
    #[serde(default = "default_term_free_minutes")]
    pub free_minutes: u32,

    /// Cost per billed minute once the included minutes are used up
    #[serde(default = "default_term_minute_rate")]
    pub minute_rate: Decimal,
}

fn default_term_monthly_fee() -> Decimal {
    Decimal::new(2000, 2)
}

fn default_term_deposit() -> Decimal {
    Decimal::new(30000, 2)
}

fn default_term_free_minutes() -> u32 {
    100
}

fn default_term_minute_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Prepaid pricing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PrepaidTariff {
    /// Cost per billed minute
    #[serde(default = "default_prepaid_minute_rate")]
    pub minute_rate: Decimal,

    /// A balance above this value triggers a top-up at the start of a cycle
    #[serde(default = "default_low_credit_threshold")]
    pub low_credit_threshold: Decimal,

    /// Credit added by a top-up
    #[serde(default = "default_top_up")]
    pub top_up: Decimal,
}

fn default_prepaid_minute_rate() -> Decimal {
    Decimal::new(25, 3)
}

fn default_low_credit_threshold() -> Decimal {
    Decimal::new(-10, 0)
}

fn default_top_up() -> Decimal {
    Decimal::new(25, 0)
}

impl Default for MtmTariff {
    fn default() -> Self {
        Self {
            monthly_fee: default_mtm_monthly_fee(),
            minute_rate: default_mtm_minute_rate(),
        }
    }
}

impl Default for TermTariff {
    fn default() -> Self {
        Self {
            monthly_fee: default_term_monthly_fee(),
            deposit: default_term_deposit(),
            free_minutes: default_term_free_minutes(),
            minute_rate: default_term_minute_rate(),
        }
    }
}

impl Default for PrepaidTariff {
    fn default() -> Self {
        Self {
            minute_rate: default_prepaid_minute_rate(),
            low_credit_threshold: default_low_credit_threshold(),
            top_up: default_top_up(),
        }
    }
}

impl TariffConfig {
    /// Load tariffs from `.env`, optional config files and the environment
    ///
    /// Sources, later ones winning: built-in defaults, `config/default`,
    /// `config/{RUN_MODE}`, then `PHONELINE__*` variables
    /// (e.g. `PHONELINE__TERM__DEPOSIT=250`).
    pub fn load() -> Result<Self, BillingError> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        debug!("Loading tariffs for run mode: {}", run_mode);

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("PHONELINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Parse tariffs from TOML text; missing keys take their defaults
    pub fn from_toml(contents: &str) -> Result<Self, BillingError> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, BillingError> {
        let tariffs: TariffConfig = config.try_deserialize()?;
        tariffs.validate()?;
        Ok(tariffs)
    }

    /// Reject fees and rates that would credit the customer for usage
    pub fn validate(&self) -> Result<(), BillingError> {
        let non_negative = [
            ("mtm.monthly_fee", self.mtm.monthly_fee),
            ("mtm.minute_rate", self.mtm.minute_rate),
            ("term.monthly_fee", self.term.monthly_fee),
            ("term.deposit", self.term.deposit),
            ("term.minute_rate", self.term.minute_rate),
            ("prepaid.minute_rate", self.prepaid.minute_rate),
            ("prepaid.top_up", self.prepaid.top_up),
        ];

        for (key, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(BillingError::Config(format!(
                    "{} cannot be negative (got {})",
                    key, value
                )));
            }
        }

        Ok(())
    }
}
