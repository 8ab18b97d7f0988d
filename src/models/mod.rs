//! Core data models for pocket-ledger
//!
//! This module contains all the data structures that represent the personal
//! finance domain: incomes, expense categories, expenses, peer debts, and
//! savings goals.

pub mod category;
pub mod debt;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod income;
pub mod money;

pub use category::{default_categories, CategoryPatch, ExpenseCategory, NewCategory};
pub use debt::{Debt, DebtKind, DebtPatch, DebtStatus, NewDebt};
pub use expense::{Expense, ExpensePatch, NewExpense};
pub use goal::{GoalPatch, NewGoal, SavingsGoal};
pub use ids::{CategoryId, DebtId, ExpenseId, GoalId, IncomeId, UserId};
pub use income::{Income, IncomePatch, NewIncome};
pub use money::Money;
