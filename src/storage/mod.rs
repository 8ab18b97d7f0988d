//! Key-value persistence layer for pocket-ledger
//!
//! The ledger persists each entity collection as a JSON array under a fixed
//! key. The [`KeyValueStore`] trait abstracts the actual device storage;
//! [`JsonFileStore`] keeps one file per key on disk with atomic writes, and
//! [`MemoryStore`] backs tests and ephemeral sessions. Writes from the
//! ledger go through a [`WriteQueue`] so the caller never blocks on I/O.

pub mod file_io;
pub mod json_store;
pub mod memory;
pub mod writer;

pub use file_io::{read_string, write_string_atomic};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use writer::WriteQueue;

use crate::error::LedgerResult;

/// Fixed storage keys, one per persisted collection plus the session record
pub mod keys {
    pub const INCOMES: &str = "incomes";
    pub const EXPENSE_CATEGORIES: &str = "expenseCategories";
    pub const EXPENSES: &str = "expenses";
    pub const DEBTS: &str = "debts";
    pub const SAVINGS_GOALS: &str = "savingsGoals";
    pub const USER: &str = "user";
}

/// An asynchronous-in-spirit key to serialized-value store
///
/// Each operation is independently failable and failures are treated as
/// non-fatal by the ledger: in-memory state stays authoritative for the
/// running session. Values are serialized JSON strings.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value
    fn set(&self, key: &str, value: &str) -> LedgerResult<()>;

    /// Remove the value stored under `key`; absent keys are fine
    fn remove(&self, key: &str) -> LedgerResult<()>;
}
