//! Ledger database handle: connection setup plus the one-table schema.

mod error;
mod open;
mod schema;

pub use error::{DbError, DbResult};
pub use open::{open_db, open_db_in_memory};
pub use schema::SCHEMA_VERSION;
