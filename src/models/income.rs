//! Income model
//!
//! A single income entry: where the money came from, how much, and when.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;

/// Validation errors for income entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptySource,
    NonPositiveAmount,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySource => write!(f, "Income source cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Income amount must be positive"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A recorded income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Unique identifier
    pub id: IncomeId,

    /// Where the income came from (e.g., "Salary", "Freelance")
    pub source: String,

    /// Amount received
    pub amount: Money,

    /// Date the income was received
    pub date: NaiveDate,

    /// Optional free-form note
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating an income entry (everything except the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    pub source: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for an income entry
///
/// `None` fields are retained unchanged when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomePatch {
    pub source: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Income {
    /// Create an income entry from a payload, assigning a fresh id
    pub fn new(payload: NewIncome) -> Self {
        Self {
            id: IncomeId::new(),
            source: payload.source,
            amount: payload.amount,
            date: payload.date,
            description: payload.description,
        }
    }

    /// Shallow-merge a patch into this entry; unspecified fields are retained
    pub fn apply_patch(&mut self, patch: IncomePatch) {
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.source.trim().is_empty() {
            return Err(IncomeValidationError::EmptySource);
        }
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}
