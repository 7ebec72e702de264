//! Elapsed-time helpers for interest accrual and overdue evaluation

use chrono::{DateTime, Utc};

/// Whole days elapsed from `start` to `now`; negative when `start` is in
/// the future
pub fn days_between(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_days()
}

/// Whole 7-day weeks elapsed; interest only steps at these boundaries
pub fn elapsed_weeks(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let days = days_between(start, now);
    if days <= 0 {
        0
    } else {
        days / 7
    }
}
