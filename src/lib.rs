//! pocket-ledger - Personal finance tracking core
//!
//! This library implements the data layer of a personal finance tracker:
//! incomes, categorized expenses, peer debts (borrowed/lent), and savings
//! goals, with device-local key-value persistence and the derived metrics
//! a dashboard displays.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and path management
//! - `error`: Custom error types
//! - `models`: Core data models (incomes, expenses, debts, savings goals)
//! - `storage`: Key-value persistence layer with a background write queue
//! - `ledger`: The ledger store owning the entity collections
//! - `reports`: Derived metrics recomputed on demand
//! - `session`: The persisted user session gate
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pocket_ledger::ledger::LedgerStore;
//! use pocket_ledger::storage::MemoryStore;
//!
//! let store = LedgerStore::open(Arc::new(MemoryStore::new()));
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod session;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
