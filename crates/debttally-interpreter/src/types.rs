//! Types produced by the sentence interpreter

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the debt the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The user lent money or an item to the counterparty
    Lent,
    /// The user borrowed money or an item from the counterparty
    Borrowed,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Lent => write!(f, "lent"),
            Direction::Borrowed => write!(f, "borrowed"),
        }
    }
}

/// Draft of a transaction record, pending the store-owned fields
/// (id, settled flag, creation timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Counterparty display name (title-cased)
    pub counterparty: String,
    /// Monetary amount; mutually exclusive with `item`
    pub amount: Option<Decimal>,
    /// Item name for non-monetary loans; mutually exclusive with `amount`
    pub item: Option<String>,
    /// Direction relative to the user
    pub direction: Direction,
    /// Explicit due date extracted from the sentence
    pub due_date: Option<DateTime<Utc>>,
    /// Weekly interest rate as a fraction (2% -> 0.02)
    pub interest_rate: Option<Decimal>,
    /// Free-text note
    pub note: Option<String>,
    /// Canonicalized phone number
    pub phone: Option<String>,
}

impl DraftRecord {
    pub(crate) fn money(counterparty: String, amount: Decimal, direction: Direction) -> Self {
        Self {
            counterparty,
            amount: Some(amount),
            item: None,
            direction,
            due_date: None,
            interest_rate: None,
            note: None,
            phone: None,
        }
    }

    pub(crate) fn item(counterparty: String, item: String, direction: Direction) -> Self {
        Self {
            counterparty,
            amount: None,
            item: Some(item),
            direction,
            due_date: None,
            interest_rate: None,
            note: None,
            phone: None,
        }
    }
}

/// The tagged command handed to the interpreter's consumer.
///
/// This is the sole contract between the interpreter and whatever applies
/// the result; it is transient and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ParsedAction {
    /// Log a new transaction
    Add(DraftRecord),
    /// Settle every open record for a counterparty
    Settle { counterparty: String },
}
