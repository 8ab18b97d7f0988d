//! Category resolution and per-category spending
//!
//! Expenses reference categories by id with no cascade on delete, so a
//! lookup can come back empty. `None` is the orphan sentinel; callers
//! render the [`CategoryDisplay`] fallback instead of erroring.

use chrono::{Datelike, NaiveDate};

use crate::models::{CategoryId, Expense, ExpenseCategory, Money};

/// Fallback name shown for an orphaned category reference
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Fallback color shown for an orphaned category reference
pub const UNKNOWN_CATEGORY_COLOR: &str = "#9CA3AF";

/// Resolve an expense's category; `None` means the reference is orphaned
pub fn category_for_expense<'a>(
    expense: &Expense,
    categories: &'a [ExpenseCategory],
) -> Option<&'a ExpenseCategory> {
    categories
        .iter()
        .find(|category| category.id == expense.category_id)
}

/// Name and color to render for an expense's category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDisplay {
    pub name: String,
    pub color: String,
}

impl CategoryDisplay {
    /// Resolve display values, falling back to the unknown-category tokens
    pub fn for_expense(expense: &Expense, categories: &[ExpenseCategory]) -> Self {
        match category_for_expense(expense, categories) {
            Some(category) => Self {
                name: category.name.clone(),
                color: category.color.clone(),
            },
            None => Self {
                name: UNKNOWN_CATEGORY_NAME.to_string(),
                color: UNKNOWN_CATEGORY_COLOR.to_string(),
            },
        }
    }
}

/// One category's spending for a calendar month, against its limit
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    pub monthly_limit: Option<Money>,
    /// Total spent in the reference month
    pub spent: Money,
    /// Number of expenses counted into `spent`
    pub expense_count: usize,
    /// Spent / limit as a percentage; `None` when the category has no limit
    pub limit_used_percent: Option<f64>,
    pub over_limit: bool,
}

/// Per-category spending for the month of `reference`
///
/// One row per category, in category insertion order. Expenses with
/// orphaned category references are not counted anywhere here; they still
/// appear in overall totals and list views.
pub fn monthly_breakdown(
    expenses: &[Expense],
    categories: &[ExpenseCategory],
    reference: NaiveDate,
) -> Vec<CategoryBreakdown> {
    categories
        .iter()
        .map(|category| {
            let in_month: Vec<&Expense> = expenses
                .iter()
                .filter(|expense| {
                    expense.category_id == category.id
                        && expense.date.year() == reference.year()
                        && expense.date.month() == reference.month()
                })
                .collect();
            let spent: Money = in_month.iter().map(|expense| expense.amount).sum();
            let limit_used_percent = category
                .monthly_limit
                .map(|limit| spent.ratio_of(limit) * 100.0);
            let over_limit = category
                .monthly_limit
                .map(|limit| spent > limit)
                .unwrap_or(false);

            CategoryBreakdown {
                category_id: category.id,
                name: category.name.clone(),
                color: category.color.clone(),
                monthly_limit: category.monthly_limit,
                spent,
                expense_count: in_month.len(),
                limit_used_percent,
                over_limit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewCategory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(name: &str, limit_cents: Option<i64>) -> ExpenseCategory {
        ExpenseCategory::new(NewCategory {
            name: name.into(),
            color: "#3B82F6".into(),
            monthly_limit: limit_cents.map(Money::from_cents),
        })
    }

    fn expense(category_id: CategoryId, cents: i64, date_: NaiveDate) -> Expense {
        Expense {
            id: ExpenseId::new(),
            category_id,
            amount: Money::from_cents(cents),
            date: date_,
            description: "Expense".into(),
        }
    }

    #[test]
    fn test_category_lookup_hits() {
        let categories = vec![category("Food", None), category("Transit", None)];
        let e = expense(categories[1].id, 500, date(2024, 3, 1));

        let found = category_for_expense(&e, &categories).unwrap();
        assert_eq!(found.name, "Transit");
    }

    #[test]
    fn test_orphaned_lookup_returns_none() {
        let categories = vec![category("Food", None)];
        let e = expense(CategoryId::new(), 500, date(2024, 3, 1));

        assert!(category_for_expense(&e, &categories).is_none());
    }

    #[test]
    fn test_display_fallback_for_orphan() {
        let categories = vec![category("Food", None)];
        let orphaned = expense(CategoryId::new(), 500, date(2024, 3, 1));

        let display = CategoryDisplay::for_expense(&orphaned, &categories);
        assert_eq!(display.name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(display.color, UNKNOWN_CATEGORY_COLOR);

        let resolved = CategoryDisplay::for_expense(
            &expense(categories[0].id, 500, date(2024, 3, 1)),
            &categories,
        );
        assert_eq!(resolved.name, "Food");
        assert_eq!(resolved.color, "#3B82F6");
    }

    #[test]
    fn test_monthly_breakdown_sums_within_month() {
        let food = category("Food", Some(50_000));
        let transit = category("Transit", Some(30_000));
        let reference = date(2024, 3, 15);

        let expenses = vec![
            expense(food.id, 20_000, date(2024, 3, 2)),
            expense(food.id, 35_000, date(2024, 3, 20)),
            expense(food.id, 10_000, date(2024, 2, 28)), // out of month
            expense(transit.id, 5_000, date(2024, 3, 10)),
        ];

        let rows = monthly_breakdown(&expenses, &[food.clone(), transit.clone()], reference);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Food");
        assert_eq!(rows[0].spent.cents(), 55_000);
        assert_eq!(rows[0].expense_count, 2);
        assert!(rows[0].over_limit);
        assert!((rows[0].limit_used_percent.unwrap() - 110.0).abs() < 1e-9);

        assert_eq!(rows[1].name, "Transit");
        assert_eq!(rows[1].spent.cents(), 5_000);
        assert!(!rows[1].over_limit);
    }

    #[test]
    fn test_breakdown_without_limit() {
        let misc = category("Misc", None);
        let expenses = vec![expense(misc.id, 1_000, date(2024, 3, 1))];

        let rows = monthly_breakdown(&expenses, &[misc], date(2024, 3, 15));
        assert_eq!(rows[0].limit_used_percent, None);
        assert!(!rows[0].over_limit);
    }

    #[test]
    fn test_breakdown_row_per_category_even_when_unused() {
        let food = category("Food", Some(10_000));
        let rows = monthly_breakdown(&[], &[food], date(2024, 3, 15));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spent, Money::zero());
        assert_eq!(rows[0].expense_count, 0);
    }
}
