use super::outcome::{BatchError, EntryOutcome};

const ENTRY_DELIMITER: char = ';';
const FIELD_DELIMITER: char = '|';

/// Field layout expected by a batch command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    /// `sku|name|quantity`
    Add,
    /// `sku|quantity`
    Sell,
}

impl EntryShape {
    pub fn arity(self) -> usize {
        match self {
            Self::Add => 3,
            Self::Sell => 2,
        }
    }

    /// Human-readable field template, e.g. `SKU|Name|qty`.
    pub fn template(self) -> &'static str {
        match self {
            Self::Add => "SKU|Name|qty",
            Self::Sell => "SKU|qty",
        }
    }
}

/// One well-formed entry, borrowed from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedEntry<'a> {
    pub sku: &'a str,
    /// Present for [`EntryShape::Add`] only.
    pub name: Option<&'a str>,
    pub quantity: i64,
}

/// Splits `payload` into entries and parses each against `shape`.
///
/// Entries are split on `;` first; blank segments are dropped. Each remaining
/// segment is split on `|` and every field is trimmed. Malformed entries come
/// back as the `Err` outcome to report for them, in position.
///
/// # Errors
/// Returns [`BatchError::EmptyBatch`] when no non-blank entry remains.
pub fn parse_entries(
    payload: &str,
    shape: EntryShape,
) -> Result<Vec<Result<ParsedEntry<'_>, EntryOutcome>>, BatchError> {
    let entries = payload
        .split(ENTRY_DELIMITER)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_entry(entry, shape))
        .collect::<Vec<_>>();

    if entries.is_empty() {
        return Err(BatchError::EmptyBatch { expected: shape });
    }
    Ok(entries)
}

fn parse_entry(entry: &str, shape: EntryShape) -> Result<ParsedEntry<'_>, EntryOutcome> {
    let fields = entry.split(FIELD_DELIMITER).map(str::trim).collect::<Vec<_>>();
    if fields.len() != shape.arity() || fields[0].is_empty() {
        return Err(EntryOutcome::InvalidFormat {
            entry: entry.to_string(),
            expected: shape,
        });
    }

    let sku = fields[0];
    let raw_quantity = fields[fields.len() - 1];
    let invalid_quantity = || EntryOutcome::InvalidQuantity {
        sku: sku.to_string(),
        raw: raw_quantity.to_string(),
    };

    let quantity = raw_quantity.parse::<i64>().map_err(|_| invalid_quantity())?;
    let name = match shape {
        EntryShape::Add => Some(fields[1]),
        EntryShape::Sell => {
            if quantity < 0 {
                return Err(invalid_quantity());
            }
            None
        }
    };

    Ok(ParsedEntry {
        sku,
        name,
        quantity,
    })
}
