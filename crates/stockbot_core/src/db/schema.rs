//! The `stock` table and its `PRAGMA user_version` stamp.
//!
//! # Invariants
//! - A file stamped above [`SCHEMA_VERSION`] is refused untouched.
//! - Files stamped below it (including fresh ones at 0) get the table
//!   created and the stamp raised in one transaction.
//! - The DDL is `IF NOT EXISTS`, so a pre-existing `stock` table from an
//!   unstamped file is adopted as is.

use super::{DbError, DbResult};
use rusqlite::Connection;

/// Schema revision written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const STOCK_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS stock (
    sku      TEXT PRIMARY KEY,
    name     TEXT NOT NULL DEFAULT '',
    quantity INTEGER NOT NULL DEFAULT 0
);";

pub(super) fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(STOCK_TABLE_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, SCHEMA_VERSION};
    use crate::db::DbError;
    use rusqlite::Connection;

    fn user_version(conn: &Connection) -> u32 {
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn stamps_fresh_connection_and_is_repeatable() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();
        assert_eq!(user_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn adopts_existing_unstamped_stock_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stock (sku TEXT PRIMARY KEY, name TEXT NOT NULL DEFAULT '', quantity INTEGER NOT NULL DEFAULT 0);
             INSERT INTO stock VALUES ('A', 'Blue Saree', 7);",
        )
        .unwrap();

        ensure_schema(&mut conn).unwrap();

        assert_eq!(user_version(&conn), SCHEMA_VERSION);
        let quantity: i64 = conn
            .query_row("SELECT quantity FROM stock WHERE sku = 'A';", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(quantity, 7);
    }

    #[test]
    fn refuses_newer_stamp_without_touching_it() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 7;").unwrap();

        let err = ensure_schema(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            DbError::SchemaTooNew { found: 7, supported } if supported == SCHEMA_VERSION
        ));
        assert_eq!(user_version(&conn), 7);
    }
}
