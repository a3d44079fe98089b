//! Month-to-month contract
//!
//! No deposit and no term commitment. Every cycle costs a flat fee and every
//! started minute is billed.

use chrono::NaiveDate;
use phoneline_core::{config::MtmTariff, Bill, BillingResult, ContractKind, TariffConfig};
use tracing::{info, instrument};

use crate::contract::{Contract, ContractBase};

/// Month-to-month contract
#[derive(Debug, Clone, PartialEq)]
pub struct MtmContract {
    base: ContractBase,
    tariff: MtmTariff,
}

impl MtmContract {
    /// Create a contract starting on `start` with the standard tariffs
    pub fn new(start: NaiveDate) -> Self {
        Self::with_tariffs(start, &TariffConfig::default())
    }

    pub fn with_tariffs(start: NaiveDate, tariffs: &TariffConfig) -> Self {
        Self {
            base: ContractBase::new(start),
            tariff: tariffs.mtm.clone(),
        }
    }
}

impl Contract for MtmContract {
    fn kind(&self) -> ContractKind {
        ContractKind::Mtm
    }

    fn base(&self) -> &ContractBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ContractBase {
        &mut self.base
    }

    #[instrument(skip(self, bill))]
    fn new_month(&mut self, month: u32, year: i32, bill: Bill) -> BillingResult<()> {
        let bill = self.base.begin_cycle(month, year, bill)?;
        bill.add_fixed_cost(self.tariff.monthly_fee);
        bill.set_rates(ContractKind::Mtm, self.tariff.minute_rate);

        info!("MTM cycle {}/{} started, fixed cost {}", month, year, bill.fixed_cost);
        Ok(())
    }
}
