use super::parser::EntryShape;
use crate::ledger::LedgerError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result of one batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Upsert applied; `name` is the name stored for the SKU.
    Added {
        sku: String,
        name: String,
        delta: i64,
        quantity: i64,
    },
    /// Decrement applied.
    Sold {
        sku: String,
        amount: i64,
        quantity: i64,
    },
    /// Wrong field count or empty SKU.
    InvalidFormat { entry: String, expected: EntryShape },
    /// Quantity text did not parse, or was negative where that is not allowed.
    InvalidQuantity { sku: String, raw: String },
    NotFound { sku: String },
    /// Decrement refused; the stored quantity is unchanged.
    InsufficientStock {
        sku: String,
        requested: i64,
        current: i64,
    },
    /// Storage failure for this entry only.
    Failed { sku: String, reason: String },
}

impl EntryOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Sold { .. })
    }

    pub(crate) fn from_ledger_error(sku: &str, err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(sku) => Self::NotFound { sku },
            LedgerError::InsufficientStock {
                sku,
                current,
                requested,
            } => Self::InsufficientStock {
                sku,
                requested,
                current,
            },
            LedgerError::NegativeAmount(amount) => Self::InvalidQuantity {
                sku: sku.to_string(),
                raw: amount.to_string(),
            },
            other => Self::Failed {
                sku: sku.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// Ordered outcomes for every entry of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    pub(crate) fn new(outcomes: Vec<EntryOutcome>) -> Self {
        Self { outcomes }
    }

    /// Outcomes in input order, one per entry.
    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<EntryOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.len() - self.applied_count()
    }
}

/// Whole-batch precondition failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchError {
    /// The payload held no non-blank entries.
    EmptyBatch { expected: EntryShape },
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBatch { expected } => {
                write!(f, "no valid entries found (expected {})", expected.template())
            }
        }
    }
}

impl Error for BatchError {}
