//! Prepaid contract
//!
//! The customer buys credit up front and calls draw it down. There is no
//! monthly fee; the running balance is carried into each new cycle as a fixed
//! cost.
//!
//! # Sign convention
//!
//! `balance` is stored from the provider's point of view:
//!
//! - negative: credit the customer still has
//! - positive: amount the customer owes
//!
//! The constructor takes the customer's *credit* and negates it, so a line
//! opened with 100 of credit starts at a balance of -100.

use chrono::NaiveDate;
use phoneline_core::{
    config::PrepaidTariff, Bill, BillingResult, Call, ContractKind, TariffConfig,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::contract::{Contract, ContractBase};

/// Prepaid contract with a running credit balance
#[derive(Debug, Clone, PartialEq)]
pub struct PrepaidContract {
    base: ContractBase,
    tariff: PrepaidTariff,
    balance: Decimal,
}

impl PrepaidContract {
    /// Create a contract starting on `start` holding `credit` with the
    /// standard tariffs
    pub fn new(start: NaiveDate, credit: Decimal) -> Self {
        Self::with_tariffs(start, credit, &TariffConfig::default())
    }

    pub fn with_tariffs(start: NaiveDate, credit: Decimal, tariffs: &TariffConfig) -> Self {
        Self {
            base: ContractBase::new(start),
            tariff: tariffs.prepaid.clone(),
            balance: -credit,
        }
    }

    /// Current balance: negative is credit, positive is debt
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl Contract for PrepaidContract {
    fn kind(&self) -> ContractKind {
        ContractKind::Prepaid
    }

    fn base(&self) -> &ContractBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ContractBase {
        &mut self.base
    }

    #[instrument(skip(self, bill), fields(balance = %self.balance))]
    fn new_month(&mut self, month: u32, year: i32, bill: Bill) -> BillingResult<()> {
        let bill = self.base.begin_cycle(month, year, bill)?;
        bill.set_rates(ContractKind::Prepaid, self.tariff.minute_rate);

        if self.balance > self.tariff.low_credit_threshold {
            self.balance -= self.tariff.top_up;
            debug!("Low credit, topped up {}", self.tariff.top_up);
        }

        // Carry the balance into this cycle
        bill.add_fixed_cost(self.balance);

        info!(
            "PREPAID cycle {}/{} started, carried balance {}",
            month, year, self.balance
        );
        Ok(())
    }

    #[instrument(skip(self, call), fields(duration = call.duration))]
    fn bill_call(&mut self, call: &Call) -> BillingResult<()> {
        let minutes = call.billed_minutes();
        let bill = self.base.bill_mut()?;
        bill.add_billed_minutes(minutes);
        self.balance = bill.cost();

        debug!("Billed {} minutes, balance now {}", minutes, self.balance);
        Ok(())
    }

    /// Debt is owed in full; leftover credit is forfeited, never refunded
    #[instrument(skip(self), fields(balance = %self.balance))]
    fn cancel_contract(&mut self) -> BillingResult<Decimal> {
        self.base.terminate()?;

        let owed = self.balance.max(Decimal::ZERO);
        info!("Contract cancelled, amount owed: {}", owed);
        Ok(owed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phoneline_core::BillingError;
    use rust_decimal_macros::dec;

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    fn call_minutes(minutes: u32) -> Call {
        let time = start_date().and_hms_opt(20, 45, 0).unwrap();
        Call::new("613-555-0142", "613-555-0177", time, minutes * 60)
    }

    #[test]
    fn test_credit_becomes_negative_balance() {
        let contract = PrepaidContract::new(start_date(), dec!(40));
        assert_eq!(contract.balance(), dec!(-40));
    }

    #[test]
    fn test_negative_input_becomes_debt() {
        let contract = PrepaidContract::new(start_date(), dec!(-40));
        assert_eq!(contract.balance(), dec!(40));
    }

    #[test]
    fn test_no_top_up_with_enough_credit() {
        let mut contract = PrepaidContract::new(start_date(), dec!(100));
        contract.new_month(1, 2023, Bill::new()).unwrap();

        assert_eq!(contract.balance(), dec!(-100));
        let bill = contract.current_bill().unwrap();
        assert_eq!(bill.plan, Some(ContractKind::Prepaid));
        assert_eq!(bill.minute_rate, dec!(0.025));
        assert_eq!(bill.fixed_cost, dec!(-100));
    }

    #[test]
    fn test_no_top_up_at_threshold() {
        let mut contract = PrepaidContract::new(start_date(), dec!(10));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        assert_eq!(contract.balance(), dec!(-10));
    }

    #[test]
    fn test_top_up_when_credit_low() {
        let mut contract = PrepaidContract::new(start_date(), dec!(5));
        contract.new_month(1, 2023, Bill::new()).unwrap();

        assert_eq!(contract.balance(), dec!(-30));
        assert_eq!(contract.current_bill().unwrap().fixed_cost, dec!(-30));
    }

    #[test]
    fn test_top_up_when_in_debt() {
        let mut contract = PrepaidContract::new(start_date(), dec!(-40));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        assert_eq!(contract.balance(), dec!(15));
    }

    #[test]
    fn test_calls_sync_balance_to_bill() {
        let mut contract = PrepaidContract::new(start_date(), dec!(100));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        contract.bill_call(&call_minutes(40)).unwrap();

        // -100 + 40 * 0.025
        assert_eq!(contract.balance(), dec!(-99.00));
        assert_eq!(contract.current_bill().unwrap().billed_minutes, 40);
    }

    #[test]
    fn test_balance_carries_into_next_cycle() {
        let mut contract = PrepaidContract::new(start_date(), dec!(12));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        assert_eq!(contract.balance(), dec!(-12));

        contract.bill_call(&call_minutes(120)).unwrap();
        assert_eq!(contract.balance(), dec!(-9.00));

        // -9 is above -10, so the next cycle tops up
        contract.new_month(2, 2023, Bill::new()).unwrap();
        assert_eq!(contract.balance(), dec!(-34.00));
        assert_eq!(contract.current_bill().unwrap().cost(), dec!(-34.00));
    }

    #[test]
    fn test_cancel_with_credit_owes_nothing() {
        let mut contract = PrepaidContract::new(start_date(), dec!(100));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        contract.bill_call(&call_minutes(10)).unwrap();

        assert_eq!(contract.cancel_contract(), Ok(Decimal::ZERO));
        assert_eq!(contract.start(), None);
    }

    #[test]
    fn test_cancel_with_zero_balance_owes_nothing() {
        let mut contract = PrepaidContract::new(start_date(), dec!(25));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        contract.bill_call(&call_minutes(1000)).unwrap();

        assert_eq!(contract.balance(), dec!(0));
        assert_eq!(contract.cancel_contract(), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_cancel_with_debt_owes_balance() {
        let mut contract = PrepaidContract::new(start_date(), dec!(25));
        contract.new_month(1, 2023, Bill::new()).unwrap();
        contract.bill_call(&call_minutes(2000)).unwrap();

        // -25 + 2000 * 0.025 = 25
        assert_eq!(contract.balance(), dec!(25.00));
        assert_eq!(contract.cancel_contract(), Ok(dec!(25.00)));
    }

    #[test]
    fn test_cancel_without_cycle_fails() {
        let mut contract = PrepaidContract::new(start_date(), dec!(25));
        assert_eq!(contract.cancel_contract(), Err(BillingError::NoActiveCycle));
    }
}
