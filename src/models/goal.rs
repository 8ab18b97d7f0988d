//! Savings goal model
//!
//! A goal tracks progress toward a target amount. Over-saving past the
//! target is allowed; the balance can never go below zero, so withdrawals
//! are silently clamped rather than rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::GoalId;
use super::money::Money;

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NegativeBalance,
}

impl std::fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Target amount must be positive"),
            Self::NegativeBalance => write!(f, "Saved amount cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name (e.g., "Emergency Fund")
    pub name: String,

    /// Amount being saved toward
    pub target_amount: Money,

    /// Amount saved so far; starts at zero, never negative
    pub current_amount: Money,

    /// Optional target date
    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    /// Display color token
    pub color: String,
}

/// Payload for creating a goal (id excluded, saved amount starts at zero)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub color: String,
}

/// Partial update for a goal
///
/// `None` fields are retained unchanged when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    pub deadline: Option<NaiveDate>,
    pub color: Option<String>,
}

impl SavingsGoal {
    /// Create a goal from a payload, assigning a fresh id
    pub fn new(payload: NewGoal) -> Self {
        Self {
            id: GoalId::new(),
            name: payload.name,
            target_amount: payload.target_amount,
            current_amount: Money::zero(),
            deadline: payload.deadline,
            color: payload.color,
        }
    }

    /// Add to the saved amount (over-saving past the target is allowed)
    pub fn deposit(&mut self, amount: Money) {
        self.current_amount += amount;
    }

    /// Subtract from the saved amount, clamping the result at zero
    pub fn withdraw(&mut self, amount: Money) {
        self.current_amount = (self.current_amount - amount).max(Money::zero());
    }

    /// Shallow-merge a patch into this goal; unspecified fields are retained
    pub fn apply_patch(&mut self, patch: GoalPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(target_amount) = patch.target_amount {
            self.target_amount = target_amount;
        }
        if let Some(current_amount) = patch.current_amount {
            self.current_amount = current_amount;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = Some(deadline);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeBalance);
        }
        Ok(())
    }
}
