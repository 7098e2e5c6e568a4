//! Unit test modules.

mod avatar_economy_test;
mod completion_flow_test;
mod migration_test;
mod store_test;
mod tier_gating_test;

use aiquest::ProgressDocument;
use chrono::NaiveDate;

/// Build a date, panicking on invalid input.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A fresh document as of 2026-10-17 (a Saturday).
pub fn fresh() -> ProgressDocument {
    ProgressDocument::new(day(2026, 10, 17))
}
