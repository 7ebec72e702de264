//! Transaction record DTO shared with external stores

use chrono::{DateTime, Utc};
use debttally_interpreter::{Direction, DraftRecord};
use debttally_utils::normalize_party;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One logged loan or repayment.
///
/// Exactly one of `amount`/`item` is populated. Settled records contribute
/// nothing to principal, interest, or overdue state but stay retrievable
/// for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Opaque unique id, assigned by the store
    pub id: String,
    /// Counterparty name; compared case-folded + trimmed everywhere
    pub counterparty: String,
    /// Monetary amount; mutually exclusive with `item`
    pub amount: Option<Decimal>,
    /// Item name for non-monetary loans; mutually exclusive with `amount`
    pub item: Option<String>,
    /// Direction relative to the user
    pub direction: Direction,
    /// Excluded from aggregation once true
    pub settled: bool,
    /// Interest/overdue clock origin
    pub created_at: DateTime<Utc>,
    /// Overrides created-at + grace for item overdue checks
    pub due_date: Option<DateTime<Utc>>,
    /// Weekly rate as a fraction; active only while unsettled, lending-side
    pub interest_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub phone: Option<String>,
}

impl DebtRecord {
    /// Materialize an interpreter draft into a persistable record
    pub fn from_draft(draft: DraftRecord, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            counterparty: draft.counterparty,
            amount: draft.amount,
            item: draft.item,
            direction: draft.direction,
            settled: false,
            created_at,
            due_date: draft.due_date,
            interest_rate: draft.interest_rate,
            notes: draft.note,
            phone: draft.phone,
        }
    }

    /// Normalized grouping key for this record's counterparty
    pub fn party_key(&self) -> String {
        normalize_party(&self.counterparty)
    }

    /// Signed contribution to principal: positive when owed to the user.
    /// Records without an amount contribute zero.
    pub fn signed_amount(&self) -> Decimal {
        let amount = match self.amount {
            Some(amount) => amount,
            None => return Decimal::ZERO,
        };
        match self.direction {
            Direction::Lent => amount,
            Direction::Borrowed => -amount,
        }
    }

    /// Whether this record carries money rather than an item
    pub fn is_monetary(&self) -> bool {
        self.amount.is_some()
    }

    /// Plain key-value view for persistence and export layers
    pub fn to_kv(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(direction: Direction, amount: i64) -> DebtRecord {
        DebtRecord {
            id: "rec-1".to_string(),
            counterparty: "John".to_string(),
            amount: Some(Decimal::from(amount)),
            item: None,
            direction,
            settled: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            due_date: None,
            interest_rate: None,
            notes: None,
            phone: None,
        }
    }

    #[test]
    fn test_signed_amount_by_direction() {
        assert_eq!(record(Direction::Lent, 100).signed_amount(), Decimal::from(100));
        assert_eq!(record(Direction::Borrowed, 100).signed_amount(), Decimal::from(-100));
    }

    #[test]
    fn test_party_key_normalizes() {
        let mut r = record(Direction::Lent, 10);
        r.counterparty = "  JOHN ".to_string();
        assert_eq!(r.party_key(), "john");
    }

    #[test]
    fn test_kv_view_round_trips() {
        let r = record(Direction::Lent, 100);
        let kv = r.to_kv();
        assert_eq!(kv["counterparty"], "John");
        assert_eq!(kv["direction"], "lent");
        let back: DebtRecord = serde_json::from_value(kv).unwrap();
        assert_eq!(back.signed_amount(), Decimal::from(100));
    }
}
