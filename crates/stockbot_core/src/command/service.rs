use super::invocation::Invocation;
use crate::batch::{BatchError, BatchProcessor, BatchReport};
use crate::ledger::{LedgerError, LedgerStore};
use crate::model::stock_item::StockItem;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CommandResult<T> = Result<T, CommandError>;

/// Usage line and one-line description of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command, in help order.
pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "start",
        usage: "/start",
        description: "show the welcome message",
    },
    CommandHelp {
        name: "help",
        usage: "/help",
        description: "show this message",
    },
    CommandHelp {
        name: "addsku",
        usage: "/addsku <SKU> <name> <qty>",
        description: "add new SKU or increase qty",
    },
    CommandHelp {
        name: "stock",
        usage: "/stock <SKU>",
        description: "show qty for SKU",
    },
    CommandHelp {
        name: "sell",
        usage: "/sell <SKU> <qty>",
        description: "reduce qty (record sale)",
    },
    CommandHelp {
        name: "list",
        usage: "/list",
        description: "show all SKUs",
    },
    CommandHelp {
        name: "addbulk",
        usage: "/addbulk SKU|Name|qty; SKU2|Name2|qty2; ...",
        description: "add or increase several SKUs",
    },
    CommandHelp {
        name: "sellbulk",
        usage: "/sellbulk SKU|qty; SKU2|qty2; ...",
        description: "record several sales",
    },
    CommandHelp {
        name: "delete",
        usage: "/delete <SKU>",
        description: "remove a SKU permanently",
    },
];

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    AddSku {
        sku: String,
        name: String,
        quantity: i64,
    },
    Stock {
        sku: String,
    },
    Sell {
        sku: String,
        quantity: i64,
    },
    List,
    AddBulk {
        payload: String,
    },
    SellBulk {
        payload: String,
    },
    Delete {
        sku: String,
    },
}

impl Command {
    /// Validates argument count and quantity syntax for `invocation`.
    ///
    /// `addsku` takes the first argument as SKU, the last as quantity and
    /// joins everything between with single spaces as the name.
    pub fn parse(invocation: &Invocation) -> CommandResult<Self> {
        let args = invocation.args.as_slice();
        let usage = || CommandError::usage(&invocation.name);

        let command = match invocation.name.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "addsku" => {
                let [sku, name @ .., quantity] = args else {
                    return Err(usage());
                };
                if name.is_empty() {
                    return Err(usage());
                }
                Self::AddSku {
                    sku: sku.clone(),
                    name: name.join(" "),
                    quantity: parse_quantity(quantity)?,
                }
            }
            "stock" => match args {
                [sku] => Self::Stock { sku: sku.clone() },
                _ => return Err(usage()),
            },
            "sell" => match args {
                [sku, raw] => {
                    let quantity = parse_quantity(raw)?;
                    if quantity < 0 {
                        return Err(CommandError::InvalidQuantity { raw: raw.clone() });
                    }
                    Self::Sell {
                        sku: sku.clone(),
                        quantity,
                    }
                }
                _ => return Err(usage()),
            },
            "list" => Self::List,
            "addbulk" | "sellbulk" => {
                if invocation.raw_args.trim().is_empty() {
                    return Err(usage());
                }
                let payload = invocation.raw_args.clone();
                if invocation.name == "addbulk" {
                    Self::AddBulk { payload }
                } else {
                    Self::SellBulk { payload }
                }
            }
            "delete" => match args {
                [sku] => Self::Delete { sku: sku.clone() },
                _ => return Err(usage()),
            },
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

/// Structured result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Welcome,
    Help(&'static [CommandHelp]),
    /// `item` is the stored row after the upsert.
    Added {
        item: StockItem,
        delta: i64,
    },
    Stock(StockItem),
    Sold {
        sku: String,
        amount: i64,
        quantity: i64,
    },
    /// All items in SKU order; empty when the ledger is empty.
    Listing(Vec<StockItem>),
    Batch(BatchReport),
    Deleted {
        sku: String,
    },
}

#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    /// Wrong argument count; carries the usage line to show.
    Usage { usage: &'static str },
    /// Quantity argument is not an integer, or is negative for a sale.
    InvalidQuantity { raw: String },
    Ledger(LedgerError),
    Batch(BatchError),
}

impl CommandError {
    fn usage(name: &str) -> Self {
        let usage = COMMANDS
            .iter()
            .find(|help| help.name == name)
            .map_or("/help", |help| help.usage);
        Self::Usage { usage }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown command: /{name}"),
            Self::Usage { usage } => write!(f, "usage: {usage}"),
            Self::InvalidQuantity { raw } => write!(f, "quantity must be a number, got `{raw}`"),
            Self::Ledger(err) => write!(f, "{err}"),
            Self::Batch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ledger(err) => Some(err),
            Self::Batch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LedgerError> for CommandError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

impl From<BatchError> for CommandError {
    fn from(value: BatchError) -> Self {
        Self::Batch(value)
    }
}

/// Runs commands against a borrowed ledger.
pub struct CommandService<'store> {
    store: &'store LedgerStore,
}

impl<'store> CommandService<'store> {
    pub fn new(store: &'store LedgerStore) -> Self {
        Self { store }
    }

    /// Parses and runs one invocation.
    pub fn execute(&self, invocation: &Invocation) -> CommandResult<CommandOutcome> {
        debug!(
            "event=command_execute module=command status=start name={}",
            invocation.name
        );
        let command = Command::parse(invocation)?;
        self.run(command)
    }

    /// Runs an already-validated command.
    pub fn run(&self, command: Command) -> CommandResult<CommandOutcome> {
        let outcome = match command {
            Command::Start => CommandOutcome::Welcome,
            Command::Help => CommandOutcome::Help(COMMANDS),
            Command::AddSku {
                sku,
                name,
                quantity,
            } => CommandOutcome::Added {
                item: self.store.upsert(&sku, &name, quantity)?,
                delta: quantity,
            },
            Command::Stock { sku } => CommandOutcome::Stock(self.store.lookup(&sku)?),
            Command::Sell { sku, quantity } => {
                let remaining = self.store.decrement(&sku, quantity)?;
                CommandOutcome::Sold {
                    sku,
                    amount: quantity,
                    quantity: remaining,
                }
            }
            Command::List => CommandOutcome::Listing(self.store.list_all()?),
            Command::AddBulk { payload } => {
                CommandOutcome::Batch(BatchProcessor::new(self.store).add(&payload)?)
            }
            Command::SellBulk { payload } => {
                CommandOutcome::Batch(BatchProcessor::new(self.store).sell(&payload)?)
            }
            Command::Delete { sku } => {
                self.store.delete(&sku)?;
                CommandOutcome::Deleted { sku }
            }
        };
        Ok(outcome)
    }
}

fn parse_quantity(raw: &str) -> CommandResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| CommandError::InvalidQuantity {
            raw: raw.to_string(),
        })
}
