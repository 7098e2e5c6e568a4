//! Streak calculation.
//!
//! The streak is derived from the distinct `last_completed_date` values of
//! all lesson records, counted backward from `today`. No activity log is kept,
//! so a missed day drops the streak to zero the next time it is computed.

use super::types::ProgressDocument;
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// Distinct days with at least one lesson completion on record.
pub fn activity_dates(doc: &ProgressDocument) -> BTreeSet<NaiveDate> {
    doc.lesson_records
        .values()
        .filter_map(|r| r.last_completed_date)
        .collect()
}

/// Consecutive days ending today with activity. Zero when today has none.
pub fn compute_streak(doc: &ProgressDocument, today: NaiveDate) -> u32 {
    let dates = activity_dates(doc);
    if dates.is_empty() {
        return 0;
    }

    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// XP multiplier for a streak: step function at 3, 7 and 14 days.
pub fn streak_multiplier(streak: u32) -> f64 {
    if streak >= 14 {
        2.0
    } else if streak >= 7 {
        1.5
    } else if streak >= 3 {
        1.2
    } else {
        1.0
    }
}

/// Recompute `current_streak` and raise `longest_streak` to match.
pub fn update_streaks(doc: &ProgressDocument, today: NaiveDate) -> ProgressDocument {
    let current = compute_streak(doc, today);
    ProgressDocument {
        current_streak: current,
        longest_streak: doc.longest_streak.max(current),
        ..doc.clone()
    }
}
