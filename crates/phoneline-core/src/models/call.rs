//! Call record model
//!
//! A single completed call as loaded from the call history.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Seconds per billed minute
const SECONDS_PER_MINUTE: u32 = 60;

/// Completed call record
///
/// Immutable once created. The timestamp places the call in the billing
/// cycle (month/year) it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Calling number
    pub src_number: String,

    /// Called number
    pub dst_number: String,

    /// When the call started
    pub time: NaiveDateTime,

    /// Call duration in seconds
    pub duration: u32,
}

impl Call {
    pub fn new(
        src_number: impl Into<String>,
        dst_number: impl Into<String>,
        time: NaiveDateTime,
        duration: u32,
    ) -> Self {
        Self {
            src_number: src_number.into(),
            dst_number: dst_number.into(),
            time,
            duration,
        }
    }

    /// Whole minutes to bill, rounding any partial minute up
    #[inline]
    pub fn billed_minutes(&self) -> u32 {
        self.duration.div_ceil(SECONDS_PER_MINUTE)
    }

    /// Month (1-12) of the billing cycle this call belongs to
    #[inline]
    pub fn month(&self) -> u32 {
        self.time.month()
    }

    /// Year of the billing cycle this call belongs to
    #[inline]
    pub fn year(&self) -> i32 {
        self.time.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn call_with_duration(duration: u32) -> Call {
        let time = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Call::new("867-5309", "555-0100", time, duration)
    }

    #[test]
    fn test_billed_minutes_rounds_up() {
        assert_eq!(call_with_duration(0).billed_minutes(), 0);
        assert_eq!(call_with_duration(1).billed_minutes(), 1);
        assert_eq!(call_with_duration(60).billed_minutes(), 1);
        assert_eq!(call_with_duration(61).billed_minutes(), 2);
        assert_eq!(call_with_duration(90).billed_minutes(), 2);
        assert_eq!(call_with_duration(6000).billed_minutes(), 100);
    }

    #[test]
    fn test_cycle_of_call() {
        let call = call_with_duration(30);
        assert_eq!(call.month(), 1);
        assert_eq!(call.year(), 2023);
    }

    proptest! {
        #[test]
        fn prop_billed_minutes_is_ceiling(duration in 0u32..1_000_000) {
            let minutes = call_with_duration(duration).billed_minutes();
            prop_assert!(minutes * 60 >= duration);
            if duration > 0 {
                prop_assert!((minutes - 1) * 60 < duration);
            } else {
                prop_assert_eq!(minutes, 0);
            }
        }
    }
}
