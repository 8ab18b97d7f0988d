//! Configuration for pocket-ledger
//!
//! Currently limited to data-directory path resolution.

pub mod paths;

pub use paths::LedgerPaths;
