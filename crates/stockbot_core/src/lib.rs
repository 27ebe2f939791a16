//! Inventory ledger core for the stock bot.
//! Owns the SKU ledger, batch application and command semantics; transports
//! hand in parsed invocations and render the structured outcomes.

pub mod batch;
pub mod command;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod model;

pub use batch::{BatchError, BatchProcessor, BatchReport, EntryOutcome, EntryShape};
pub use command::{
    Command, CommandError, CommandHelp, CommandOutcome, CommandResult, CommandService, Invocation,
};
pub use ledger::{LedgerError, LedgerResult, LedgerStore, StockIter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::stock_item::{SkuValidationError, StockItem};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
