//! The ledger store
//!
//! Single source of truth for the five entity collections during an app
//! session. All mutation and read access goes through [`LedgerStore`].

pub mod store;

pub use store::LedgerStore;
