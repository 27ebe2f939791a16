//! Delimited batch payloads applied entry by entry.
//!
//! # Responsibility
//! - Parse `;`-separated entries of `|`-separated fields.
//! - Apply each entry to the ledger and record one outcome per entry.
//!
//! # Invariants
//! - Entries run in input order; a failed entry never stops later ones.
//! - Applied entries are never rolled back.
//! - The only whole-batch failure is an empty payload.
//! - There is no escaping: fields cannot contain `;` or `|`.

mod outcome;
mod parser;
mod processor;

pub use outcome::{BatchError, BatchReport, EntryOutcome};
pub use parser::{parse_entries, EntryShape, ParsedEntry};
pub use processor::BatchProcessor;
