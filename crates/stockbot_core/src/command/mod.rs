//! Named commands over the ledger.
//!
//! # Responsibility
//! - Turn an already-received invocation (name + arguments) into a typed
//!   command, validate its arguments and run it.
//! - Return structured outcomes; rendering belongs to the transport.
//!
//! # Invariants
//! - Batch commands receive the unsplit argument remainder.
//! - One invocation yields exactly one outcome or one error.

mod invocation;
mod service;

pub use invocation::Invocation;
pub use service::{
    Command, CommandError, CommandHelp, CommandOutcome, CommandResult, CommandService, COMMANDS,
};
