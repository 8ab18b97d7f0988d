//! Overall financial position
//!
//! Totals, balance, monthly sums, outstanding debt, and the dashboard's
//! recent-activity feed. All functions are pure over the collections they
//! receive; [`DashboardSummary`] bundles them from a ledger snapshot.

use chrono::{Datelike, NaiveDate};

use crate::error::LedgerResult;
use crate::ledger::LedgerStore;
use crate::models::{Debt, DebtKind, Expense, Income, Money, SavingsGoal};

/// Number of entries on the dashboard's recent-activity feed
pub const RECENT_ACTIVITY_LEN: usize = 3;

/// Sum of all income amounts
pub fn total_income(incomes: &[Income]) -> Money {
    incomes.iter().map(|income| income.amount).sum()
}

/// Sum of all expense amounts
pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Total income minus total expenses (may be negative)
pub fn balance(incomes: &[Income], expenses: &[Expense]) -> Money {
    total_income(incomes) - total_expenses(expenses)
}

/// Income received in the same calendar month and year as `reference`
pub fn monthly_income(incomes: &[Income], reference: NaiveDate) -> Money {
    incomes
        .iter()
        .filter(|income| same_month(income.date, reference))
        .map(|income| income.amount)
        .sum()
}

/// Expenses dated in the same calendar month and year as `reference`
pub fn monthly_expenses(expenses: &[Expense], reference: NaiveDate) -> Money {
    expenses
        .iter()
        .filter(|expense| same_month(expense.date, reference))
        .map(|expense| expense.amount)
        .sum()
}

/// Pending borrowed total (settled debts are excluded)
pub fn outstanding_borrowed(debts: &[Debt]) -> Money {
    outstanding_of_kind(debts, DebtKind::Borrowed)
}

/// Pending lent total (settled debts are excluded)
pub fn outstanding_lent(debts: &[Debt]) -> Money {
    outstanding_of_kind(debts, DebtKind::Lent)
}

/// Outstanding borrowed minus outstanding lent
pub fn net_debt(debts: &[Debt]) -> Money {
    outstanding_borrowed(debts) - outstanding_lent(debts)
}

/// Sum of saved amounts across all goals
pub fn total_savings(goals: &[SavingsGoal]) -> Money {
    goals.iter().map(|goal| goal.current_amount).sum()
}

/// The last `n` expenses by insertion order, last-added first
///
/// This is deliberately NOT date-sorted; the date-ordered views live in
/// [`crate::reports::lists`].
pub fn recent_expenses(expenses: &[Expense], n: usize) -> Vec<Expense> {
    expenses.iter().rev().take(n).cloned().collect()
}

fn outstanding_of_kind(debts: &[Debt], kind: DebtKind) -> Money {
    debts
        .iter()
        .filter(|debt| debt.kind == kind && debt.is_outstanding())
        .map(|debt| debt.amount)
        .sum()
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Everything the dashboard screen displays, computed in one pass
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub total_borrowed: Money,
    pub total_lent: Money,
    pub net_debt: Money,
    pub total_savings: Money,
    pub recent_activity: Vec<Expense>,
}

impl DashboardSummary {
    /// Compute the summary from the ledger's current collections
    pub fn generate(ledger: &LedgerStore, today: NaiveDate) -> LedgerResult<Self> {
        let incomes = ledger.incomes()?;
        let expenses = ledger.expenses()?;
        let debts = ledger.debts()?;
        let goals = ledger.goals()?;

        Ok(Self {
            total_income: total_income(&incomes),
            total_expenses: total_expenses(&expenses),
            balance: balance(&incomes, &expenses),
            monthly_income: monthly_income(&incomes, today),
            monthly_expenses: monthly_expenses(&expenses, today),
            total_borrowed: outstanding_borrowed(&debts),
            total_lent: outstanding_lent(&debts),
            net_debt: net_debt(&debts),
            total_savings: total_savings(&goals),
            recent_activity: recent_expenses(&expenses, RECENT_ACTIVITY_LEN),
        })
    }
}
