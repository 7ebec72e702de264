//! Debt ledger core: records, aggregation, and the store contract.
//!
//! The interpreter crate turns free text into drafts; this crate turns
//! drafts into records, nets them into per-counterparty summaries, and
//! defines the settlement operations a store must support.

pub mod aggregate;
pub mod error;
pub mod record;
pub mod store;
pub mod summary;
pub mod time;

pub use aggregate::{summarize, DEFAULT_GRACE_PERIOD_DAYS};
pub use error::{CoreError, CoreResult};
pub use record::DebtRecord;
pub use store::{DebtStore, MemoryDebtStore};
pub use summary::{BorrowedItem, DebtorSummary};

pub use debttally_interpreter::Direction;

// ==================== Tests ====================
