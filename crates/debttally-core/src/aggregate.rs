//! Debt ledger aggregation: principal netting, simple interest accrual,
//! and overdue classification.
//!
//! `summarize` is a pure function of (records, now, grace period); identical
//! inputs at a fixed instant produce identical output. Summaries are cheap
//! to recompute — O(records) — and are meant to be rebuilt per query, never
//! cached incrementally.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use debttally_interpreter::Direction;
use debttally_utils::normalize_party;
use rust_decimal::Decimal;

use crate::record::DebtRecord;
use crate::summary::{BorrowedItem, DebtorSummary};
use crate::time::{days_between, elapsed_weeks};

/// Days after creation before an unsettled monetary debt counts as overdue
pub const DEFAULT_GRACE_PERIOD_DAYS: i64 = 7;

/// Aggregate a record snapshot into one summary per counterparty with at
/// least one active monetary or item record. Fully settled counterparties
/// are omitted. Output order is deterministic (normalized name).
pub fn summarize(
    records: &[DebtRecord],
    now: DateTime<Utc>,
    grace_period_days: i64,
) -> Vec<DebtorSummary> {
    // BTreeMap keeps the output deterministic across runs
    let mut groups: BTreeMap<String, Vec<&DebtRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.settled) {
        groups
            .entry(normalize_party(&record.counterparty))
            .or_default()
            .push(record);
    }

    groups
        .into_values()
        .filter_map(|group| summarize_group(&group, now, grace_period_days))
        .collect()
}

fn summarize_group(
    group: &[&DebtRecord],
    now: DateTime<Utc>,
    grace_period_days: i64,
) -> Option<DebtorSummary> {
    let monetary: Vec<&DebtRecord> = group.iter().copied().filter(|r| r.is_monetary()).collect();
    // a record violating the amount/item exclusivity is read as monetary;
    // one populating neither is ignored rather than raised
    let item_records: Vec<&DebtRecord> = group
        .iter()
        .copied()
        .filter(|r| !r.is_monetary() && r.item.is_some())
        .collect();
    if monetary.is_empty() && item_records.is_empty() {
        return None;
    }

    let name = group[0].counterparty.trim().to_string();
    let principal: Decimal = monetary.iter().map(|r| r.signed_amount()).sum();
    let accrued_interest = accrued_interest(&monetary, now);
    let days_overdue = money_days_overdue(&monetary, now, grace_period_days);
    let overdue = days_overdue > 0 && principal > Decimal::ZERO;
    let items: Vec<BorrowedItem> = item_records.iter().map(|r| borrowed_item(r, now)).collect();
    let note = group
        .iter()
        .find_map(|r| r.notes.clone().filter(|n| !n.is_empty()));

    Some(DebtorSummary {
        name,
        principal,
        accrued_interest,
        total: principal + accrued_interest,
        owes_me: principal > Decimal::ZERO,
        overdue,
        days_overdue,
        items,
        note,
    })
}

/// Simple weekly interest on unsettled, rate-bearing, lending-side records.
/// Borrowing-side records never accrue: the user is modeled only as lender
/// for interest purposes.
fn accrued_interest(monetary: &[&DebtRecord], now: DateTime<Utc>) -> Decimal {
    monetary
        .iter()
        .filter(|r| r.direction == Direction::Lent)
        .filter_map(|r| {
            let rate = r.interest_rate?;
            let amount = r.amount?;
            if amount <= Decimal::ZERO {
                return None;
            }
            let weeks = elapsed_weeks(r.created_at, now);
            if weeks <= 0 {
                return None;
            }
            Some(amount * rate * Decimal::from(weeks))
        })
        .sum()
}

/// Days past the grace period, counted from the oldest unsettled monetary
/// record; zero while within the grace window
fn money_days_overdue(monetary: &[&DebtRecord], now: DateTime<Utc>, grace_period_days: i64) -> i64 {
    let oldest = match monetary.iter().map(|r| r.created_at).min() {
        Some(oldest) => oldest,
        None => return 0,
    };
    (days_between(oldest, now) - grace_period_days).max(0)
}

/// Items go overdue only on an explicit due date
fn borrowed_item(record: &DebtRecord, now: DateTime<Utc>) -> BorrowedItem {
    let (overdue, days_overdue) = match record.due_date {
        Some(due) if due < now => (true, days_between(due, now).max(0)),
        _ => (false, 0),
    };
    BorrowedItem {
        name: record.item.clone().unwrap_or_default(),
        due_date: record.due_date,
        direction: record.direction,
        overdue,
        days_overdue,
    }
}

// ==================== Tests ====================
