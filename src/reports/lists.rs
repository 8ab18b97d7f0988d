//! Date-sorted list views
//!
//! The list screens sort by date descending, unlike the dashboard's
//! recent-activity feed which uses reverse insertion order. Sorting is
//! stable, so entries sharing a date keep their insertion order.

use crate::models::{Debt, Expense, Income};

/// Expenses sorted by date, newest first
pub fn expenses_by_date(expenses: &[Expense]) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Incomes sorted by date, newest first
pub fn incomes_by_date(incomes: &[Income]) -> Vec<Income> {
    let mut sorted = incomes.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Debts sorted by the date the money changed hands, newest first
pub fn debts_by_date(debts: &[Debt]) -> Vec<Debt> {
    let mut sorted = debts.to_vec();
    sorted.sort_by(|a, b| b.date_borrowed.cmp(&a.date_borrowed));
    sorted
}
