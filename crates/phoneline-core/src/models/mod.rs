//! Domain models for PhoneLine billing
//!
//! This module contains the records contracts read (calls) and write (bills).

pub mod bill;
pub mod call;
pub mod plan;

pub use bill::{Bill, BillSummary};
pub use call::Call;
pub use plan::ContractKind;
