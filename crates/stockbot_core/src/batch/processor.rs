use super::outcome::{BatchError, BatchReport, EntryOutcome};
use super::parser::{parse_entries, EntryShape, ParsedEntry};
use crate::ledger::LedgerStore;
use log::{info, warn};
use std::time::Instant;

/// Applies batch payloads to a borrowed ledger.
///
/// Each entry is its own ledger operation. There is no enclosing
/// transaction, so earlier entries stay applied whatever happens later.
pub struct BatchProcessor<'store> {
    store: &'store LedgerStore,
}

impl<'store> BatchProcessor<'store> {
    pub fn new(store: &'store LedgerStore) -> Self {
        Self { store }
    }

    /// Applies `sku|name|quantity` entries as upserts.
    pub fn add(&self, payload: &str) -> Result<BatchReport, BatchError> {
        self.run(payload, EntryShape::Add, |entry| {
            let name = entry.name.unwrap_or_default();
            match self.store.upsert(entry.sku, name, entry.quantity) {
                Ok(item) => EntryOutcome::Added {
                    sku: item.sku,
                    name: item.name,
                    delta: entry.quantity,
                    quantity: item.quantity,
                },
                Err(err) => EntryOutcome::from_ledger_error(entry.sku, err),
            }
        })
    }

    /// Applies `sku|quantity` entries as decrements.
    pub fn sell(&self, payload: &str) -> Result<BatchReport, BatchError> {
        self.run(payload, EntryShape::Sell, |entry| {
            match self.store.decrement(entry.sku, entry.quantity) {
                Ok(quantity) => EntryOutcome::Sold {
                    sku: entry.sku.to_string(),
                    amount: entry.quantity,
                    quantity,
                },
                Err(err) => EntryOutcome::from_ledger_error(entry.sku, err),
            }
        })
    }

    fn run(
        &self,
        payload: &str,
        shape: EntryShape,
        apply: impl Fn(&ParsedEntry<'_>) -> EntryOutcome,
    ) -> Result<BatchReport, BatchError> {
        let started_at = Instant::now();
        let kind = shape_label(shape);

        let entries = match parse_entries(payload, shape) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("event=batch_apply module=batch status=rejected kind={kind} error_code=empty_batch");
                return Err(err);
            }
        };

        let outcomes = entries
            .into_iter()
            .map(|parsed| match parsed {
                Ok(entry) => apply(&entry),
                Err(rejected) => rejected,
            })
            .collect::<Vec<_>>();
        let report = BatchReport::new(outcomes);

        info!(
            "event=batch_apply module=batch status=ok kind={kind} entries={} applied={} rejected={} duration_ms={}",
            report.len(),
            report.applied_count(),
            report.rejected_count(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}

fn shape_label(shape: EntryShape) -> &'static str {
    match shape {
        EntryShape::Add => "add",
        EntryShape::Sell => "sell",
    }
}
