//! Expense model
//!
//! Each expense references a category by id. Deleting a category does not
//! cascade, so an expense may hold an orphaned reference; the reports layer
//! resolves those to an "unknown category" fallback at display time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expense amount must be positive"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The category this expense belongs to (may be orphaned)
    pub category_id: CategoryId,

    /// Amount spent
    pub amount: Money,

    /// Date of the expense
    pub date: NaiveDate,

    /// What the money was spent on
    pub description: String,
}

/// Payload for creating an expense (everything except the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
}

/// Partial update for an expense
///
/// `None` fields are retained unchanged when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Expense {
    /// Create an expense from a payload, assigning a fresh id
    pub fn new(payload: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            category_id: payload.category_id,
            amount: payload.amount,
            date: payload.date,
            description: payload.description,
        }
    }

    /// Shallow-merge a patch into this expense; unspecified fields are retained
    pub fn apply_patch(&mut self, patch: ExpensePatch) {
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> NewExpense {
        NewExpense {
            category_id: CategoryId::new(),
            amount: Money::from_cents(4_250),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            description: "Groceries".into(),
        }
    }

    #[test]
    fn test_new_expense() {
        let payload = groceries();
        let expense = Expense::new(payload.clone());
        assert_eq!(expense.category_id, payload.category_id);
        assert_eq!(expense.amount, payload.amount);
        assert_eq!(expense.description, "Groceries");
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(groceries());
        expense.description = " ".into();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::EmptyDescription)
        );

        expense.description = "Groceries".into();
        expense.amount = Money::from_cents(-100);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_apply_patch_reassigns_category() {
        let mut expense = Expense::new(groceries());
        let before = expense.clone();
        let new_category = CategoryId::new();

        expense.apply_patch(ExpensePatch {
            category_id: Some(new_category),
            ..Default::default()
        });

        assert_eq!(expense.category_id, new_category);
        assert_eq!(expense.amount, before.amount);
        assert_eq!(expense.date, before.date);
        assert_eq!(expense.description, before.description);
    }

    #[test]
    fn test_serialization_round_trip() {
        let expense = Expense::new(groceries());
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, deserialized);
    }
}
