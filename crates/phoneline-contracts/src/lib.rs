//! Contract billing policies for PhoneLine billing
//!
//! This crate turns call records into monthly charges. Each contract type
//! decides how a cycle's fixed costs are set up, how call minutes are charged
//! and what is owed when the line is cancelled.
//!
//! # Contracts
//!
//! - `MtmContract` - flat monthly fee, every minute billed
//! - `TermContract` - deposit, lower fee, free minutes, refundable deposit
//! - `PrepaidContract` - running credit balance with automatic top-ups
//!
//! All of them implement [`Contract`] and share the lifecycle kept by
//! [`ContractBase`].

pub mod contract;
pub mod mtm;
pub mod prepaid;
pub mod term;

pub use contract::{Contract, ContractBase, CycleState};
pub use mtm::MtmContract;
pub use prepaid::PrepaidContract;
pub use term::TermContract;
