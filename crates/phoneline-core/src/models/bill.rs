//! Monthly bill model
//!
//! Accumulates the charges of one billing cycle for one phone line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContractKind;

/// Cost accumulator for a single billing cycle
///
/// Fixed costs (fees, deposits, carried balances) and billed minutes make up
/// the total. Free minutes are tracked for reporting but never cost anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Rate plan the cycle is billed under (unset until a contract binds it)
    pub plan: Option<ContractKind>,

    /// Cost per billed minute
    pub minute_rate: Decimal,

    /// Sum of all fixed charges and credits for the cycle
    pub fixed_cost: Decimal,

    /// Minutes consumed from an included allotment
    pub free_minutes: u32,

    /// Minutes charged at `minute_rate`
    pub billed_minutes: u32,
}

/// Serializable breakdown of a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    pub plan: Option<ContractKind>,
    pub fixed_cost: Decimal,
    pub free_minutes: u32,
    pub billed_minutes: u32,
    pub minute_rate: Decimal,
    pub billed_minutes_cost: Decimal,
    pub total: Decimal,
}

impl Bill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate plan and per-minute cost
    pub fn set_rates(&mut self, plan: ContractKind, minute_rate: Decimal) {
        self.plan = Some(plan);
        self.minute_rate = minute_rate;
    }

    /// Add a fixed charge; negative amounts are credits
    pub fn add_fixed_cost(&mut self, amount: Decimal) {
        self.fixed_cost += amount;
    }

    /// Add minutes charged at the current rate
    ///
    /// Counters saturate at `u32::MAX` instead of wrapping.
    pub fn add_billed_minutes(&mut self, minutes: u32) {
        self.billed_minutes = self.billed_minutes.saturating_add(minutes);
    }

    /// Add minutes consumed from an included allotment
    pub fn add_free_minutes(&mut self, minutes: u32) {
        self.free_minutes = self.free_minutes.saturating_add(minutes);
    }

    /// Cost of the billed minutes alone
    #[inline]
    pub fn billed_minutes_cost(&self) -> Decimal {
        Decimal::from(self.billed_minutes) * self.minute_rate
    }

    /// Total cost of the cycle, rounded to cents
    #[inline]
    pub fn cost(&self) -> Decimal {
        (self.billed_minutes_cost() + self.fixed_cost).round_dp(2)
    }

    /// Get a serializable breakdown of the bill
    pub fn summary(&self) -> BillSummary {
        BillSummary {
            plan: self.plan,
            fixed_cost: self.fixed_cost,
            free_minutes: self.free_minutes,
            billed_minutes: self.billed_minutes,
            minute_rate: self.minute_rate,
            billed_minutes_cost: self.billed_minutes_cost(),
            total: self.cost(),
        }
    }
}
