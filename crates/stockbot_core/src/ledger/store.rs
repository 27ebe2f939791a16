//! SQLite-backed ledger store.
//!
//! # Invariants
//! - The connection sits behind a mutex; one operation runs at a time per
//!   store instance.
//! - Writes run inside `BEGIN IMMEDIATE`, so the read half of a
//!   read-check-write already holds the database write lock.
//! - A failed operation rolls back and leaves the row untouched.

use super::error::{LedgerError, LedgerResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::stock_item::{validate_sku, StockItem};
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const STOCK_SELECT_SQL: &str = "SELECT sku, name, quantity FROM stock";
const ENUMERATE_PAGE_SIZE: usize = 64;

/// Owned handle to the stock ledger.
///
/// Created by the process entry point and passed by reference to whatever
/// needs it; there is no global instance.
pub struct LedgerStore {
    conn: Mutex<Connection>,
}

impl LedgerStore {
    /// Opens the ledger file at `path`, creating the table if absent.
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a ledger that lives only as long as this value.
    pub fn open_in_memory() -> LedgerResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Closes the underlying connection and reports any error doing so.
    pub fn close(self) -> LedgerResult<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        conn.close().map_err(|(_, err)| LedgerError::from(err))?;
        info!("event=ledger_close module=ledger status=ok");
        Ok(())
    }

    /// Adds `delta` to the quantity of `sku`, creating the item on first use.
    ///
    /// The stored name is set on creation only; later calls ignore `name`.
    /// A negative `delta` is accepted and may leave the quantity negative.
    pub fn upsert(&self, sku: &str, name: &str, delta: i64) -> LedgerResult<StockItem> {
        validate_sku(sku)?;

        let result = self.write(|tx| {
            let Some(mut item) = select_item(tx, sku)? else {
                tx.execute(
                    "INSERT INTO stock (sku, name, quantity) VALUES (?1, ?2, ?3);",
                    params![sku, name, delta],
                )?;
                return Ok(StockItem::new(sku, name, delta));
            };

            item.quantity =
                item.quantity
                    .checked_add(delta)
                    .ok_or_else(|| LedgerError::QuantityOverflow {
                        sku: sku.to_string(),
                        current: item.quantity,
                        delta,
                    })?;
            update_quantity(tx, sku, item.quantity)?;
            Ok(item)
        });

        match &result {
            Ok(item) => info!(
                "event=stock_upsert module=ledger status=ok sku={} delta={} quantity={}",
                sku, delta, item.quantity
            ),
            Err(err) => log_rejection("stock_upsert", sku, err),
        }
        result
    }

    /// Returns the item stored under `sku`.
    pub fn lookup(&self, sku: &str) -> LedgerResult<StockItem> {
        let conn = self.lock();
        select_item(&conn, sku)?.ok_or_else(|| LedgerError::NotFound(sku.to_string()))
    }

    /// Iterates every item in ascending SKU order.
    ///
    /// Rows are fetched lazily in pages from the live table, so each call
    /// starts over from current state. An empty ledger yields nothing.
    pub fn enumerate(&self) -> StockIter<'_> {
        StockIter {
            store: self,
            after: None,
            page: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Collects [`LedgerStore::enumerate`] into a vector.
    pub fn list_all(&self) -> LedgerResult<Vec<StockItem>> {
        self.enumerate().collect()
    }

    /// Number of items currently stored.
    pub fn count(&self) -> LedgerResult<u64> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM stock;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Removes `amount` units from `sku` and returns the new quantity.
    ///
    /// # Errors
    /// - `NegativeAmount` when `amount < 0`.
    /// - `NotFound` when the SKU is absent.
    /// - `InsufficientStock` when `amount` exceeds the quantity on hand.
    pub fn decrement(&self, sku: &str, amount: i64) -> LedgerResult<i64> {
        if amount < 0 {
            return Err(LedgerError::NegativeAmount(amount));
        }

        let result = self.write(|tx| {
            let item = select_item(tx, sku)?
                .ok_or_else(|| LedgerError::NotFound(sku.to_string()))?;
            if !item.can_supply(amount) {
                return Err(LedgerError::InsufficientStock {
                    sku: sku.to_string(),
                    current: item.quantity,
                    requested: amount,
                });
            }

            let remaining = item.quantity - amount;
            update_quantity(tx, sku, remaining)?;
            Ok(remaining)
        });

        match &result {
            Ok(remaining) => info!(
                "event=stock_decrement module=ledger status=ok sku={} amount={} quantity={}",
                sku, amount, remaining
            ),
            Err(err) => log_rejection("stock_decrement", sku, err),
        }
        result
    }

    /// Permanently removes `sku`.
    pub fn delete(&self, sku: &str) -> LedgerResult<()> {
        let result = self.write(|tx| {
            let changed = tx.execute("DELETE FROM stock WHERE sku = ?1;", [sku])?;
            if changed == 0 {
                return Err(LedgerError::NotFound(sku.to_string()));
            }
            Ok(())
        });

        match &result {
            Ok(()) => info!("event=stock_delete module=ledger status=ok sku={sku}"),
            Err(err) => log_rejection("stock_delete", sku, err),
        }
        result
    }

    fn page_after(&self, after: Option<&str>, limit: usize) -> LedgerResult<Vec<StockItem>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "{STOCK_SELECT_SQL}
             WHERE ?1 IS NULL OR sku > ?1
             ORDER BY sku ASC
             LIMIT ?2;"
        ))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut rows = stmt.query(params![after, limit])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(item_from_row(row)?);
        }
        Ok(items)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic inside an operation drops its transaction, which rolls
        // back; the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&Transaction<'_>) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut conn = self.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

/// Lazy, ordered walk over the ledger returned by [`LedgerStore::enumerate`].
pub struct StockIter<'store> {
    store: &'store LedgerStore,
    after: Option<String>,
    page: VecDeque<StockItem>,
    exhausted: bool,
}

impl Iterator for StockIter<'_> {
    type Item = LedgerResult<StockItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.page.is_empty() && !self.exhausted {
            match self
                .store
                .page_after(self.after.as_deref(), ENUMERATE_PAGE_SIZE)
            {
                Ok(items) => {
                    self.exhausted = items.len() < ENUMERATE_PAGE_SIZE;
                    if let Some(last) = items.last() {
                        self.after = Some(last.sku.clone());
                    }
                    self.page.extend(items);
                }
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            }
        }

        self.page.pop_front().map(Ok)
    }
}

fn select_item(conn: &Connection, sku: &str) -> LedgerResult<Option<StockItem>> {
    let item = conn
        .query_row(
            &format!("{STOCK_SELECT_SQL} WHERE sku = ?1;"),
            [sku],
            item_from_row,
        )
        .optional()?;
    Ok(item)
}

fn update_quantity(conn: &Connection, sku: &str, quantity: i64) -> LedgerResult<()> {
    conn.execute(
        "UPDATE stock SET quantity = ?1 WHERE sku = ?2;",
        params![quantity, sku],
    )?;
    Ok(())
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<StockItem> {
    Ok(StockItem {
        sku: row.get("sku")?,
        name: row.get("name")?,
        quantity: row.get("quantity")?,
    })
}

fn log_rejection(event: &str, sku: &str, err: &LedgerError) {
    match err {
        LedgerError::Db(db_err) => error!(
            "event={event} module=ledger status=error sku={sku} error_code=db_error error={db_err}"
        ),
        other => warn!(
            "event={event} module=ledger status=rejected sku={sku} error_code={}",
            other.code()
        ),
    }
}
