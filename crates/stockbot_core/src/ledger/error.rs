use crate::db::DbError;
use crate::model::stock_item::SkuValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Outcome of a ledger operation that did not apply.
///
/// Every variant carries the data a caller needs to explain the rejection
/// without querying the store again.
#[derive(Debug)]
pub enum LedgerError {
    /// The SKU is absent.
    NotFound(String),
    /// A decrement asked for more than is on hand. Nothing was changed.
    InsufficientStock {
        sku: String,
        current: i64,
        requested: i64,
    },
    InvalidSku(SkuValidationError),
    /// Decrements only take non-negative amounts.
    NegativeAmount(i64),
    /// The accumulated quantity does not fit in a signed 64-bit integer.
    QuantityOverflow {
        sku: String,
        current: i64,
        delta: i64,
    },
    Db(DbError),
}

impl LedgerError {
    /// Stable snake_case code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::InvalidSku(_) => "invalid_sku",
            Self::NegativeAmount(_) => "negative_amount",
            Self::QuantityOverflow { .. } => "quantity_overflow",
            Self::Db(_) => "db_error",
        }
    }
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(sku) => write!(f, "sku not found: {sku}"),
            Self::InsufficientStock {
                sku,
                current,
                requested,
            } => write!(
                f,
                "not enough stock for {sku}: requested {requested}, have {current}"
            ),
            Self::InvalidSku(err) => write!(f, "{err}"),
            Self::NegativeAmount(amount) => {
                write!(f, "amount must not be negative, got {amount}")
            }
            Self::QuantityOverflow {
                sku,
                current,
                delta,
            } => write!(f, "quantity overflow for {sku}: {current} + {delta}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LedgerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSku(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SkuValidationError> for LedgerError {
    fn from(value: SkuValidationError) -> Self {
        Self::InvalidSku(value)
    }
}

impl From<DbError> for LedgerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
