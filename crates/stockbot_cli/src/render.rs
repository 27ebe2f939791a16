//! Plain-text replies for command outcomes.

use stockbot_core::{
    BatchError, CommandError, CommandOutcome, EntryOutcome, LedgerError, StockItem,
};

pub fn render_outcome(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Welcome => {
            "Welcome to ShopStockBot!\nUse /help to see commands.".to_string()
        }
        CommandOutcome::Help(commands) => {
            let mut text = String::from("Commands:\n");
            for help in commands.iter() {
                text.push_str(&format!("{} - {}\n", help.usage, help.description));
            }
            text.push_str("\nExamples:\n/addsku ABC123 Blue Saree 10\n/sell ABC123 2");
            text
        }
        CommandOutcome::Added { item, delta } => {
            format!(
                "SKU {} ({}) updated by {:+}. New qty: {}",
                item.sku, item.name, delta, item.quantity
            )
        }
        CommandOutcome::Stock(item) => render_item(item),
        CommandOutcome::Sold {
            sku,
            amount,
            quantity,
        } => format!("Sold {amount} of {sku}. New qty: {quantity}"),
        CommandOutcome::Listing(items) if items.is_empty() => "No items in stock.".to_string(),
        CommandOutcome::Listing(items) => {
            let mut text = String::from("Current stock:");
            for item in items {
                text.push_str(&format!("\n{} — {} — {}", item.sku, item.name, item.quantity));
            }
            text
        }
        CommandOutcome::Batch(report) => report
            .outcomes()
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n"),
        CommandOutcome::Deleted { sku } => format!("SKU {sku} has been deleted."),
    }
}

pub fn render_error(err: &CommandError) -> String {
    match err {
        CommandError::UnknownCommand(name) => {
            format!("Unknown command /{name}. Use /help to see commands.")
        }
        CommandError::Usage { usage } => format!("Usage: {usage}"),
        CommandError::InvalidQuantity { .. } => "Quantity must be a number.".to_string(),
        CommandError::Ledger(LedgerError::NotFound(_)) => "SKU not found.".to_string(),
        CommandError::Ledger(LedgerError::InsufficientStock { current, .. }) => {
            format!("Error: Not enough stock (have {current})")
        }
        CommandError::Ledger(other) => format!("Error: {other}"),
        CommandError::Batch(BatchError::EmptyBatch { .. }) => "No valid entries found.".to_string(),
    }
}

fn render_item(item: &StockItem) -> String {
    format!("SKU: {}\nName: {}\nQty: {}", item.sku, item.name, item.quantity)
}

fn render_entry(outcome: &EntryOutcome) -> String {
    match outcome {
        EntryOutcome::Added {
            sku, name, delta, ..
        } => format!("✔ `{sku}` {delta:+} ({name})"),
        EntryOutcome::Sold {
            sku,
            amount,
            quantity,
        } => format!("✔ `{sku}` - sold {amount}. New qty: {quantity}"),
        EntryOutcome::InvalidFormat { entry, expected } => {
            format!("✖ Invalid format: `{entry}` (expected {})", expected.template())
        }
        EntryOutcome::InvalidQuantity { sku, raw } => {
            format!("✖ `{sku}`: qty must be a number ({raw})")
        }
        EntryOutcome::NotFound { sku } => format!("✖ `{sku}`: SKU not found"),
        EntryOutcome::InsufficientStock { sku, current, .. } => {
            format!("✖ `{sku}`: Not enough stock (have {current})")
        }
        EntryOutcome::Failed { sku, reason } => format!("✖ `{sku}`: {reason}"),
    }
}
