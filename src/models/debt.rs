//! Peer debt model
//!
//! A debt is money either borrowed from or lent to another person. A debt
//! starts `Pending` and settles into exactly one terminal status depending
//! on its kind: `Paid` for borrowed money, `Received` for lent money.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DebtId;
use super::money::Money;

/// Whether the money was borrowed from or lent to the other person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    Borrowed,
    Lent,
}

impl DebtKind {
    /// The terminal status that settles a debt of this kind
    pub fn settled_status(&self) -> DebtStatus {
        match self {
            Self::Borrowed => DebtStatus::Paid,
            Self::Lent => DebtStatus::Received,
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed => write!(f, "borrowed"),
            Self::Lent => write!(f, "lent"),
        }
    }
}

/// Settlement status of a debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    Pending,
    Paid,
    Received,
}

impl DebtStatus {
    /// Terminal statuses permit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Received)
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Received => write!(f, "received"),
        }
    }
}

/// Validation errors for debts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtValidationError {
    EmptyPersonName,
    EmptyPurpose,
    NonPositiveAmount,
    InvalidTransition { from: DebtStatus, to: DebtStatus },
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPersonName => write!(f, "Person name cannot be empty"),
            Self::EmptyPurpose => write!(f, "Debt purpose cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Debt amount must be positive"),
            Self::InvalidTransition { from, to } => {
                write!(f, "Invalid debt status transition: {} -> {}", from, to)
            }
        }
    }
}

impl std::error::Error for DebtValidationError {}

/// A peer debt record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique identifier
    pub id: DebtId,

    /// Borrowed or lent
    #[serde(rename = "type")]
    pub kind: DebtKind,

    /// The other party
    pub person_name: String,

    /// Amount borrowed or lent
    pub amount: Money,

    /// Date the money changed hands
    pub date_borrowed: NaiveDate,

    /// Optional agreed repayment date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// What the money was for
    pub purpose: String,

    /// Settlement status
    pub status: DebtStatus,
}

/// Payload for creating a debt (id excluded, status starts `Pending`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDebt {
    #[serde(rename = "type")]
    pub kind: DebtKind,
    pub person_name: String,
    pub amount: Money,
    pub date_borrowed: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub purpose: String,
}

/// Partial update for a debt
///
/// `None` fields are retained unchanged. A `status` change is validated
/// against the transition rules before the patch is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtPatch {
    pub person_name: Option<String>,
    pub amount: Option<Money>,
    pub date_borrowed: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub status: Option<DebtStatus>,
}

impl Debt {
    /// Create a pending debt from a payload, assigning a fresh id
    pub fn new(payload: NewDebt) -> Self {
        Self {
            id: DebtId::new(),
            kind: payload.kind,
            person_name: payload.person_name,
            amount: payload.amount,
            date_borrowed: payload.date_borrowed,
            due_date: payload.due_date,
            purpose: payload.purpose,
            status: DebtStatus::Pending,
        }
    }

    /// Whether a transition from the current status to `to` is permitted
    ///
    /// Allowed moves: `Pending -> Paid` for borrowed debts, `Pending ->
    /// Received` for lent debts. Staying on the current status is always
    /// fine; terminal statuses permit nothing else.
    pub fn can_transition_to(&self, to: DebtStatus) -> bool {
        if to == self.status {
            return true;
        }
        self.status == DebtStatus::Pending && to == self.kind.settled_status()
    }

    /// Settle a pending debt into its terminal status
    pub fn settle(&mut self) -> Result<(), DebtValidationError> {
        let settled = self.kind.settled_status();
        if self.status != DebtStatus::Pending {
            return Err(DebtValidationError::InvalidTransition {
                from: self.status,
                to: settled,
            });
        }
        self.status = settled;
        Ok(())
    }

    /// Whether this debt still counts toward outstanding totals
    pub fn is_outstanding(&self) -> bool {
        self.status == DebtStatus::Pending
    }

    /// Shallow-merge a patch into this debt; unspecified fields are retained
    ///
    /// Fails without modifying anything if the patch carries an illegal
    /// status transition.
    pub fn apply_patch(&mut self, patch: DebtPatch) -> Result<(), DebtValidationError> {
        if let Some(status) = patch.status {
            if !self.can_transition_to(status) {
                return Err(DebtValidationError::InvalidTransition {
                    from: self.status,
                    to: status,
                });
            }
        }

        if let Some(person_name) = patch.person_name {
            self.person_name = person_name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date_borrowed) = patch.date_borrowed {
            self.date_borrowed = date_borrowed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(purpose) = patch.purpose {
            self.purpose = purpose;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    /// Validate the debt
    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.person_name.trim().is_empty() {
            return Err(DebtValidationError::EmptyPersonName);
        }
        if self.purpose.trim().is_empty() {
            return Err(DebtValidationError::EmptyPurpose);
        }
        if !self.amount.is_positive() {
            return Err(DebtValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}
