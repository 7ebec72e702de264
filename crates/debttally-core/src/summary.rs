//! Derived per-counterparty summaries
//!
//! Summaries are immutable values rebuilt on every query; they carry no
//! persisted identity and must never be cached and mutated in place.

use chrono::{DateTime, Utc};
use debttally_interpreter::Direction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net position against a single counterparty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtorSummary {
    /// Display name (first active record's spelling, trimmed)
    pub name: String,
    /// Net principal; positive = owed to the user
    pub principal: Decimal,
    /// Simple weekly interest accrued on lending-side records
    pub accrued_interest: Decimal,
    /// Principal plus accrued interest
    pub total: Decimal,
    /// Whether the net balance is owed to the user
    pub owes_me: bool,
    /// Monetary balance past the grace period and owed to the user
    pub overdue: bool,
    /// Days past the grace period, zero when within it
    pub days_overdue: i64,
    /// Active non-monetary loans
    pub items: Vec<BorrowedItem>,
    /// First non-empty note among unsettled records
    pub note: Option<String>,
}

/// A non-monetary loan tracked by due date instead of interest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowedItem {
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    /// Who holds whose item
    pub direction: Direction,
    /// Past an explicit due date
    pub overdue: bool,
    /// Whole days past the due date
    pub days_overdue: i64,
}
