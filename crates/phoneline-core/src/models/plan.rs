//! Contract kind
//!
//! Identifies which rate plan a bill was produced under.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    /// Month-to-month: flat fee, every minute billed
    Mtm,
    /// Fixed term: deposit, lower fee, included minutes
    Term,
    /// Prepaid: running credit balance, no monthly fee
    Prepaid,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::Mtm => write!(f, "MTM"),
            ContractKind::Term => write!(f, "TERM"),
            ContractKind::Prepaid => write!(f, "PREPAID"),
        }
    }
}

impl ContractKind {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mtm" => Some(ContractKind::Mtm),
            "term" => Some(ContractKind::Term),
            "prepaid" => Some(ContractKind::Prepaid),
            _ => None,
        }
    }
}
