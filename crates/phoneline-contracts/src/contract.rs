//! Contract trait and shared lifecycle state
//!
//! Every contract moves through the same states:
//!
//! ```text
//! Pending --new_month--> Active(bill) --new_month--> Active(next bill)
//!                             |
//!                      cancel_contract
//!                             v
//!                     Cancelled(final bill)
//! ```
//!
//! [`ContractBase`] owns that state and the bill of the current cycle.
//! Variants embed it and expose it through [`Contract::base`], which lets the
//! trait provide default `bill_call` and `cancel_contract` implementations.

use chrono::{Datelike, NaiveDate};
use phoneline_core::{Bill, BillingError, BillingResult, Call, ContractKind};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

/// Where a contract is in its lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CycleState {
    /// Created, no cycle started yet
    #[default]
    Pending,
    /// A cycle is running and owns its bill
    Active(Bill),
    /// Terminated; keeps the bill of the cancellation cycle
    Cancelled(Bill),
}

/// State common to all contracts: start date and current cycle
#[derive(Debug, Clone, PartialEq)]
pub struct ContractBase {
    start: NaiveDate,
    state: CycleState,
}

impl ContractBase {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            state: CycleState::Pending,
        }
    }

    /// Start date, or `None` once the contract is cancelled
    pub fn start(&self) -> Option<NaiveDate> {
        match self.state {
            CycleState::Cancelled(_) => None,
            _ => Some(self.start),
        }
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, CycleState::Cancelled(_))
    }

    /// Whether `month`/`year` is the cycle the contract started in
    pub fn is_start_cycle(&self, month: u32, year: i32) -> bool {
        self.start.month() == month && self.start.year() == year
    }

    /// Bind `bill` as the bill of a new cycle and hand it back for setup
    ///
    /// Any previous cycle's bill is dropped from the contract; the caller is
    /// expected to have read it through [`ContractBase::bill`] already.
    pub fn begin_cycle(&mut self, month: u32, year: i32, bill: Bill) -> BillingResult<&mut Bill> {
        if self.is_cancelled() {
            warn!("Rejected new cycle {}/{} on cancelled contract", month, year);
            return Err(BillingError::ContractCancelled);
        }
        if !(1..=12).contains(&month) {
            warn!("Rejected new cycle with invalid month {}", month);
            return Err(BillingError::InvalidMonth(month));
        }

        self.state = CycleState::Active(bill);
        match &mut self.state {
            CycleState::Active(bill) => Ok(bill),
            _ => unreachable!("state was just set to Active"),
        }
    }

    /// Bill of the current cycle (or of the cancellation cycle)
    pub fn bill(&self) -> Option<&Bill> {
        match &self.state {
            CycleState::Pending => None,
            CycleState::Active(bill) | CycleState::Cancelled(bill) => Some(bill),
        }
    }

    /// Mutable bill of the running cycle
    pub fn bill_mut(&mut self) -> BillingResult<&mut Bill> {
        match &mut self.state {
            CycleState::Active(bill) => Ok(bill),
            CycleState::Pending => Err(BillingError::NoActiveCycle),
            CycleState::Cancelled(_) => Err(BillingError::ContractCancelled),
        }
    }

    /// End the contract, returning the final cycle's bill
    pub fn terminate(&mut self) -> BillingResult<&Bill> {
        match std::mem::take(&mut self.state) {
            CycleState::Active(bill) => {
                self.state = CycleState::Cancelled(bill);
            }
            CycleState::Pending => return Err(BillingError::NoActiveCycle),
            cancelled @ CycleState::Cancelled(_) => {
                self.state = cancelled;
                return Err(BillingError::ContractCancelled);
            }
        }

        match &self.state {
            CycleState::Cancelled(bill) => Ok(bill),
            _ => unreachable!("state was just set to Cancelled"),
        }
    }
}

/// A phone line contract
///
/// Drivers call [`Contract::new_month`] once per billing cycle, then
/// [`Contract::bill_call`] for every call in that cycle, and finally
/// [`Contract::cancel_contract`] to settle the line. Cancellation is terminal:
/// every operation afterwards fails with [`BillingError::ContractCancelled`].
pub trait Contract {
    /// Rate plan this contract bills under
    fn kind(&self) -> ContractKind;

    fn base(&self) -> &ContractBase;

    fn base_mut(&mut self) -> &mut ContractBase;

    /// Start a new billing cycle for `month`/`year` on `bill`
    ///
    /// Applies the plan's fixed costs and per-minute rate to the bill.
    fn new_month(&mut self, month: u32, year: i32, bill: Bill) -> BillingResult<()>;

    /// Add `call` to the current bill
    ///
    /// By default every started minute is billed at the plan rate.
    #[instrument(skip(self, call), fields(kind = %self.kind(), duration = call.duration))]
    fn bill_call(&mut self, call: &Call) -> BillingResult<()> {
        let minutes = call.billed_minutes();
        let bill = self.base_mut().bill_mut()?;
        bill.add_billed_minutes(minutes);

        debug!("Billed {} minutes, bill now {}", minutes, bill.cost());
        Ok(())
    }

    /// Cancel the contract and return the amount owed to close the line
    ///
    /// By default the amount owed is the current bill's cost.
    #[instrument(skip(self), fields(kind = %self.kind()))]
    fn cancel_contract(&mut self) -> BillingResult<Decimal> {
        let owed = self.base_mut().terminate()?.cost();

        info!("Contract cancelled, amount owed: {}", owed);
        Ok(owed)
    }

    /// Start date, or `None` once cancelled
    fn start(&self) -> Option<NaiveDate> {
        self.base().start()
    }

    /// Bill of the current cycle, if one has been started
    fn current_bill(&self) -> Option<&Bill> {
        self.base().bill()
    }

    fn is_cancelled(&self) -> bool {
        self.base().is_cancelled()
    }
}
