//! Stock item domain model.
//!
//! # Invariants
//! - `sku` is non-empty after trimming and unique within a ledger.
//! - `name` is fixed when the item is first created.
//! - `quantity` never goes below zero through a decrement; an upsert with a
//!   negative delta may still drive it negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One row of the stock ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// Opaque stock keeping unit, primary key.
    pub sku: String,
    /// Free-text label. Not unique.
    pub name: String,
    /// Units on hand.
    pub quantity: i64,
}

impl StockItem {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
        }
    }

    /// Whether a decrement of `amount` would keep the quantity non-negative.
    pub fn can_supply(&self, amount: i64) -> bool {
        amount <= self.quantity
    }
}

/// Rejection reasons for identifiers supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuValidationError {
    Empty,
}

impl Display for SkuValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "sku must not be empty"),
        }
    }
}

impl Error for SkuValidationError {}

/// Checks that `sku` can be used as a ledger key.
///
/// Delimiter characters (`;`, `|`) are not rejected here; batch payloads
/// simply cannot express them.
pub fn validate_sku(sku: &str) -> Result<(), SkuValidationError> {
    if sku.trim().is_empty() {
        return Err(SkuValidationError::Empty);
    }
    Ok(())
}
