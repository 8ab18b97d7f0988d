//! Derived metrics for pocket-ledger
//!
//! Pure, stateless functions recomputed on every call over the ledger's
//! current collections: overall and monthly totals, outstanding debt
//! positions, savings progress, and per-category spending.

pub mod lists;
pub mod savings;
pub mod spending;
pub mod summary;

pub use savings::{GoalProgress, SavingsSummary};
pub use spending::{monthly_breakdown, CategoryBreakdown, CategoryDisplay};
pub use summary::DashboardSummary;
