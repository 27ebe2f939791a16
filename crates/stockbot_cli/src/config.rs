//! Command-line and environment settings for the CLI front end.

use clap::Parser;
use std::path::PathBuf;
use stockbot_core::default_log_level;

/// Local stock ledger front end reading `/command` lines from stdin.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "stockbot", version, long_about = None)]
pub struct CliConfig {
    /// Ledger database file; created when absent.
    #[arg(long, env = "STOCKBOT_DB_PATH", default_value = "stock.db")]
    pub db_path: PathBuf,
    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "STOCKBOT_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    pub log_level: String,
    /// Absolute directory for rolling log files. File logging is off when unset.
    #[arg(long, env = "STOCKBOT_LOG_DIR")]
    pub log_dir: Option<String>,
}
