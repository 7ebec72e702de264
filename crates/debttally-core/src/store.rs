//! Store contract for transaction records, plus the in-memory reference
//! implementation used by tests and the CLI driver.
//!
//! Persistence backends are external collaborators. The core only requires
//! two things of them: self-consistent snapshot reads (the aggregator must
//! never observe a half-written settlement) and counterparty matching
//! identical to the aggregator's normalized grouping, or the two will
//! disagree about who owes what.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use debttally_interpreter::{Direction, DraftRecord};
use debttally_utils::normalize_party;
use log::debug;
use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::record::DebtRecord;

/// Operations the core's settlement contract depends on
pub trait DebtStore {
    /// Consistent snapshot of every record, settled included
    fn fetch_all(&self) -> CoreResult<Vec<DebtRecord>>;

    /// Records for one counterparty (case-folded + trimmed match)
    fn fetch_by_counterparty(&self, counterparty: &str) -> CoreResult<Vec<DebtRecord>>;

    /// Insert a completed record
    fn append(&self, record: DebtRecord) -> CoreResult<()>;

    /// Mark every unsettled record for the counterparty settled.
    /// Returns the number of records affected; zero matches is a no-op.
    fn settle_all(&self, counterparty: &str) -> CoreResult<usize>;

    /// Append a counter-transaction for a payment received. Existing
    /// records are never mutated; the payment nets out in the next
    /// aggregation.
    fn record_partial_payment(
        &self,
        counterparty: &str,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> CoreResult<DebtRecord>;

    /// Settle only unsettled lending-side records and annotate their note,
    /// leaving any payments the user made untouched
    fn mark_defaulted(&self, counterparty: &str) -> CoreResult<usize>;

    /// Signed principal over unsettled monetary records
    fn total_owed(&self, counterparty: &str) -> CoreResult<Decimal>;
}

/// In-memory store over a consistent snapshot lock
pub struct MemoryDebtStore {
    records: RwLock<Vec<DebtRecord>>,
    next_id: AtomicU64,
}

impl Default for MemoryDebtStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDebtStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Materialize and append a draft from the interpreter
    pub fn add_draft(&self, draft: DraftRecord, now: DateTime<Utc>) -> CoreResult<DebtRecord> {
        let record = DebtRecord::from_draft(draft, self.allocate_id(), now);
        self.append(record.clone())?;
        Ok(record)
    }

    fn allocate_id(&self) -> String {
        format!("rec-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn read(&self) -> CoreResult<RwLockReadGuard<'_, Vec<DebtRecord>>> {
        self.records.read().map_err(|_| CoreError::StorePoisoned)
    }

    fn write(&self) -> CoreResult<RwLockWriteGuard<'_, Vec<DebtRecord>>> {
        self.records.write().map_err(|_| CoreError::StorePoisoned)
    }
}

impl DebtStore for MemoryDebtStore {
    fn fetch_all(&self) -> CoreResult<Vec<DebtRecord>> {
        Ok(self.read()?.clone())
    }

    fn fetch_by_counterparty(&self, counterparty: &str) -> CoreResult<Vec<DebtRecord>> {
        let key = normalize_party(counterparty);
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.party_key() == key)
            .cloned()
            .collect())
    }

    fn append(&self, record: DebtRecord) -> CoreResult<()> {
        debug!("appending record {} for {}", record.id, record.counterparty);
        self.write()?.push(record);
        Ok(())
    }

    fn settle_all(&self, counterparty: &str) -> CoreResult<usize> {
        let key = normalize_party(counterparty);
        let mut records = self.write()?;
        let mut affected = 0;
        for record in records
            .iter_mut()
            .filter(|r| !r.settled && r.party_key() == key)
        {
            record.settled = true;
            affected += 1;
        }
        debug!("settled {} records for {}", affected, counterparty);
        Ok(affected)
    }

    fn record_partial_payment(
        &self,
        counterparty: &str,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> CoreResult<DebtRecord> {
        let record = DebtRecord {
            id: self.allocate_id(),
            counterparty: counterparty.trim().to_string(),
            amount: Some(amount),
            item: None,
            direction: Direction::Borrowed,
            settled: false,
            created_at: now,
            due_date: None,
            interest_rate: None,
            notes: Some("Partial payment".to_string()),
            phone: None,
        };
        self.write()?.push(record.clone());
        Ok(record)
    }

    fn mark_defaulted(&self, counterparty: &str) -> CoreResult<usize> {
        let key = normalize_party(counterparty);
        let mut records = self.write()?;
        let mut affected = 0;
        for record in records.iter_mut().filter(|r| {
            !r.settled && r.direction == Direction::Lent && r.party_key() == key
        }) {
            record.settled = true;
            record.notes = Some(match record.notes.take() {
                Some(existing) if !existing.is_empty() => format!("{} (defaulted)", existing),
                _ => "Defaulted".to_string(),
            });
            affected += 1;
        }
        debug!("marked {} records defaulted for {}", affected, counterparty);
        Ok(affected)
    }

    fn total_owed(&self, counterparty: &str) -> CoreResult<Decimal> {
        let key = normalize_party(counterparty);
        Ok(self
            .read()?
            .iter()
            .filter(|r| !r.settled && r.party_key() == key)
            .map(|r| r.signed_amount())
            .sum())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn lent(store: &MemoryDebtStore, name: &str, amount: i64) -> DebtRecord {
        let draft = DraftRecord {
            counterparty: name.to_string(),
            amount: Some(Decimal::from(amount)),
            item: None,
            direction: Direction::Lent,
            due_date: None,
            interest_rate: None,
            note: None,
            phone: None,
        };
        store.add_draft(draft, now()).unwrap()
    }

    #[test]
    fn test_settle_all_is_idempotent() {
        let store = MemoryDebtStore::new();
        lent(&store, "Bob", 50);
        lent(&store, "Bob", 30);

        assert_eq!(store.settle_all("bob").unwrap(), 2);
        assert_eq!(store.total_owed("bob").unwrap(), Decimal::ZERO);
        // second call affects zero records
        assert_eq!(store.settle_all("bob").unwrap(), 0);
        // records survive for history
        assert_eq!(store.fetch_by_counterparty("Bob").unwrap().len(), 2);
    }

    #[test]
    fn test_settle_unknown_counterparty_is_noop() {
        let store = MemoryDebtStore::new();
        assert_eq!(store.settle_all("nobody").unwrap(), 0);
    }

    #[test]
    fn test_partial_payment_appends_and_nets() {
        let store = MemoryDebtStore::new();
        lent(&store, "John", 100);
        let before = store.total_owed("john").unwrap();

        let payment = store
            .record_partial_payment("John", Decimal::from(25), now())
            .unwrap();
        assert_eq!(payment.direction, Direction::Borrowed);
        assert!(!payment.settled);
        assert_eq!(payment.notes, Some("Partial payment".to_string()));

        assert_eq!(store.fetch_all().unwrap().len(), 2);
        assert_eq!(
            store.total_owed("john").unwrap(),
            before - Decimal::from(25)
        );
    }

    #[test]
    fn test_mark_defaulted_spares_user_payments() {
        let store = MemoryDebtStore::new();
        lent(&store, "Kim", 100);
        store
            .record_partial_payment("Kim", Decimal::from(20), now())
            .unwrap();

        assert_eq!(store.mark_defaulted("kim").unwrap(), 1);
        let records = store.fetch_by_counterparty("Kim").unwrap();
        let loan = records.iter().find(|r| r.direction == Direction::Lent).unwrap();
        assert!(loan.settled);
        assert_eq!(loan.notes, Some("Defaulted".to_string()));
        let payment = records
            .iter()
            .find(|r| r.direction == Direction::Borrowed)
            .unwrap();
        assert!(!payment.settled);
        assert_eq!(payment.notes, Some("Partial payment".to_string()));
    }

    #[test]
    fn test_mark_defaulted_appends_to_existing_note() {
        let store = MemoryDebtStore::new();
        let record = lent(&store, "Kim", 100);
        {
            let mut records = store.records.write().unwrap();
            records
                .iter_mut()
                .find(|r| r.id == record.id)
                .unwrap()
                .notes = Some("collateral: watch".to_string());
        }
        store.mark_defaulted("Kim").unwrap();
        let records = store.fetch_by_counterparty("Kim").unwrap();
        assert_eq!(
            records[0].notes,
            Some("collateral: watch (defaulted)".to_string())
        );
    }

    #[test]
    fn test_counterparty_matching_is_normalized() {
        let store = MemoryDebtStore::new();
        lent(&store, "John", 40);
        lent(&store, " JOHN ", 10);

        assert_eq!(store.total_owed("john").unwrap(), Decimal::from(50));
        assert_eq!(store.fetch_by_counterparty("  John").unwrap().len(), 2);
        assert_eq!(store.settle_all("JOHN").unwrap(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = MemoryDebtStore::new();
        let a = lent(&store, "A", 1);
        let b = lent(&store, "A", 1);
        assert_ne!(a.id, b.id);
    }
}
