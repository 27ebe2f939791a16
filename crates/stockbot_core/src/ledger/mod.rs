//! Durable SKU ledger.
//!
//! # Responsibility
//! - Own the `stock` table and every write to it.
//! - Expose single-row operations that are atomic per call.
//!
//! # Invariants
//! - Each operation commits before returning success.
//! - Only `decrement` enforces `quantity >= 0`.

mod error;
mod store;

pub use error::{LedgerError, LedgerResult};
pub use store::{LedgerStore, StockIter};
