//! Fixed-term contract
//!
//! A term contract has a start and an end date but keeps running past the end
//! date until cancelled. It trades a one-time deposit for a lower monthly fee,
//! a lower minute rate and a monthly allotment of free minutes.
//!
//! The deposit is refunded on cancellation only once the term is over. The
//! check compares months and years, not days: the cancellation cycle's year
//! must be at or past the end year *and* its month strictly after the end
//! month. Cancelling in the end month itself forfeits the deposit.

use chrono::{Datelike, NaiveDate};
use phoneline_core::{
    config::TermTariff, Bill, BillingError, BillingResult, Call, ContractKind, TariffConfig,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::contract::{Contract, ContractBase};

/// Fixed-term contract with deposit and free minutes
#[derive(Debug, Clone, PartialEq)]
pub struct TermContract {
    base: ContractBase,
    tariff: TermTariff,
    end_date: NaiveDate,
    /// Free minutes left in the current cycle
    free: u32,
    current_month: u32,
    current_year: i32,
}

impl TermContract {
    /// Create a contract running from `start` to `end` with the standard tariffs
    pub fn new(start: NaiveDate, end: NaiveDate) -> BillingResult<Self> {
        Self::with_tariffs(start, end, &TariffConfig::default())
    }

    pub fn with_tariffs(
        start: NaiveDate,
        end: NaiveDate,
        tariffs: &TariffConfig,
    ) -> BillingResult<Self> {
        if end < start {
            return Err(BillingError::InvalidTerm { start, end });
        }

        Ok(Self {
            base: ContractBase::new(start),
            tariff: tariffs.term.clone(),
            end_date: end,
            free: tariffs.term.free_minutes,
            current_month: start.month(),
            current_year: start.year(),
        })
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Free minutes left in the current cycle
    pub fn free_minutes(&self) -> u32 {
        self.free
    }

    /// Whether cancelling in the current cycle earns the deposit back
    pub fn term_fulfilled(&self) -> bool {
        self.current_year >= self.end_date.year() && self.current_month > self.end_date.month()
    }
}

impl Contract for TermContract {
    fn kind(&self) -> ContractKind {
        ContractKind::Term
    }

    fn base(&self) -> &ContractBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ContractBase {
        &mut self.base
    }

    #[instrument(skip(self, bill))]
    fn new_month(&mut self, month: u32, year: i32, bill: Bill) -> BillingResult<()> {
        let first_cycle = self.base.is_start_cycle(month, year);
        let bill = self.base.begin_cycle(month, year, bill)?;

        if first_cycle {
            bill.add_fixed_cost(self.tariff.deposit);
            debug!("Charged term deposit {}", self.tariff.deposit);
        }
        bill.add_fixed_cost(self.tariff.monthly_fee);
        bill.set_rates(ContractKind::Term, self.tariff.minute_rate);

        self.free = self.tariff.free_minutes;
        self.current_month = month;
        self.current_year = year;

        info!(
            "TERM cycle {}/{} started, fixed cost {}, {} free minutes",
            month, year, bill.fixed_cost, self.free
        );
        Ok(())
    }

    #[instrument(skip(self, call), fields(duration = call.duration))]
    fn bill_call(&mut self, call: &Call) -> BillingResult<()> {
        let minutes = call.billed_minutes();
        let bill = self.base.bill_mut()?;

        if minutes <= self.free {
            bill.add_free_minutes(minutes);
            self.free -= minutes;
            debug!("{} free minutes used, {} left", minutes, self.free);
        } else {
            let billed = minutes - self.free;
            bill.add_free_minutes(self.free);
            bill.add_billed_minutes(billed);
            debug!(
                "Free minutes exhausted: {} free, {} billed",
                self.free, billed
            );
            self.free = 0;
        }

        Ok(())
    }

    #[instrument(skip(self))]
    fn cancel_contract(&mut self) -> BillingResult<Decimal> {
        let cost = self.base.terminate()?.cost();

        if self.term_fulfilled() {
            let owed = cost - self.tariff.deposit;
            info!("Term fulfilled, deposit refunded, amount owed: {}", owed);
            Ok(owed)
        } else {
            warn!(
                "Cancelled in {}/{} before term end {}, deposit forfeited",
                self.current_month, self.current_year, self.end_date
            );
            Ok(cost)
        }
    }
}
