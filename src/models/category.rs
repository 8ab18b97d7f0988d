//! Expense category model
//!
//! Categories label expenses for display and carry an optional monthly
//! spending limit. Duplicate names are allowed; categories are identified
//! by id only.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// Validation errors for expense categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NonPositiveLimit,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NonPositiveLimit => write!(f, "Monthly limit must be positive"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// An expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (uniqueness is not enforced)
    pub name: String,

    /// Display color token (hex string in practice)
    pub color: String,

    /// Optional spending limit per calendar month
    #[serde(default)]
    pub monthly_limit: Option<Money>,
}

/// Payload for creating a category (everything except the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub monthly_limit: Option<Money>,
}

/// Partial update for a category
///
/// `None` fields are retained unchanged when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub monthly_limit: Option<Money>,
}

impl ExpenseCategory {
    /// Create a category from a payload, assigning a fresh id
    pub fn new(payload: NewCategory) -> Self {
        Self {
            id: CategoryId::new(),
            name: payload.name,
            color: payload.color,
            monthly_limit: payload.monthly_limit,
        }
    }

    /// Shallow-merge a patch into this category; unspecified fields are retained
    pub fn apply_patch(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(limit) = patch.monthly_limit {
            self.monthly_limit = Some(limit);
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if let Some(limit) = self.monthly_limit {
            if !limit.is_positive() {
                return Err(CategoryValidationError::NonPositiveLimit);
            }
        }
        Ok(())
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The seed categories used when no persisted categories exist yet
pub fn default_categories() -> Vec<ExpenseCategory> {
    let seed: [(&str, &str, i64); 6] = [
        ("Food & Dining", "#EF4444", 500),
        ("Transportation", "#3B82F6", 300),
        ("Utilities", "#10B981", 200),
        ("Entertainment", "#8B5CF6", 200),
        ("Healthcare", "#06B6D4", 150),
        ("Shopping", "#F59E0B", 300),
    ];

    seed.into_iter()
        .map(|(name, color, limit)| ExpenseCategory {
            id: CategoryId::new(),
            name: name.to_string(),
            color: color.to_string(),
            monthly_limit: Some(Money::from_dollars(limit)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = ExpenseCategory::new(NewCategory {
            name: "Pets".into(),
            color: "#EC4899".into(),
            monthly_limit: None,
        });
        assert_eq!(category.name, "Pets");
        assert!(category.monthly_limit.is_none());
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_name() {
        let mut category = ExpenseCategory::new(NewCategory {
            name: "Pets".into(),
            color: "#EC4899".into(),
            monthly_limit: None,
        });
        category.name = "".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));
    }

    #[test]
    fn test_validation_non_positive_limit() {
        let mut category = ExpenseCategory::new(NewCategory {
            name: "Pets".into(),
            color: "#EC4899".into(),
            monthly_limit: Some(Money::zero()),
        });
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NonPositiveLimit)
        );
        category.monthly_limit = Some(Money::from_dollars(50));
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_apply_patch() {
        let mut category = ExpenseCategory::new(NewCategory {
            name: "Pets".into(),
            color: "#EC4899".into(),
            monthly_limit: None,
        });
        let id = category.id;

        category.apply_patch(CategoryPatch {
            monthly_limit: Some(Money::from_dollars(75)),
            ..Default::default()
        });

        assert_eq!(category.id, id);
        assert_eq!(category.name, "Pets");
        assert_eq!(category.monthly_limit, Some(Money::from_dollars(75)));
    }

    #[test]
    fn test_default_categories_seed() {
        let seed = default_categories();
        assert_eq!(seed.len(), 6);
        assert_eq!(seed[0].name, "Food & Dining");
        assert_eq!(seed[0].color, "#EF4444");
        assert_eq!(seed[0].monthly_limit, Some(Money::from_dollars(500)));
        assert_eq!(seed[4].name, "Healthcare");
        assert_eq!(seed[4].monthly_limit, Some(Money::from_dollars(150)));

        // Every seed category validates and has a distinct id
        let mut ids = std::collections::HashSet::new();
        for category in &seed {
            assert!(category.validate().is_ok());
            assert!(ids.insert(category.id));
        }
    }
}
