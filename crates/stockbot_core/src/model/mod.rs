//! Ledger domain model.
//!
//! # Invariants
//! - Every item is identified by its SKU; there is no surrogate key.
//! - Deletion is permanent; there are no tombstones.

pub mod stock_item;
