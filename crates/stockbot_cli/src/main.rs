//! Local front end for the stock ledger.
//!
//! # Responsibility
//! - Own the ledger lifecycle for one process.
//! - Read `/command ...` lines from stdin and print one reply per line.
//!
//! Stands in for a chat transport: everything it knows about commands comes
//! from `stockbot_core`.

mod config;
mod render;

use clap::Parser;
use config::CliConfig;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use stockbot_core::{CommandService, Invocation, LedgerStore};

fn main() -> ExitCode {
    let config = CliConfig::parse();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = stockbot_core::init_logging(&config.log_level, log_dir) {
            eprintln!("stockbot: file logging disabled: {err}");
        }
    }

    let store = match LedgerStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!(
                "stockbot: cannot open ledger `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=cli_start module=cli status=ok version={}",
        stockbot_core::core_version()
    );

    let serve_result = serve(&store, io::stdin().lock(), io::stdout().lock());
    let close_result = store.close();

    match (serve_result, close_result) {
        (Ok(()), Ok(())) => ExitCode::SUCCESS,
        (Err(err), _) => {
            error!("event=cli_stop module=cli status=error error={err}");
            eprintln!("stockbot: {err}");
            ExitCode::FAILURE
        }
        (Ok(()), Err(err)) => {
            eprintln!("stockbot: failed to close ledger: {err}");
            ExitCode::FAILURE
        }
    }
}

fn serve(store: &LedgerStore, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let service = CommandService::new(store);
    println_reply(&mut output, "ShopStockBot ready. Use /help to see commands.")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match Invocation::parse(&line) {
            Some(invocation) => match service.execute(&invocation) {
                Ok(outcome) => render::render_outcome(&outcome),
                Err(err) => render::render_error(&err),
            },
            None => "Commands start with `/`. Use /help to see commands.".to_string(),
        };
        println_reply(&mut output, &reply)?;
    }

    Ok(())
}

fn println_reply(output: &mut impl Write, reply: &str) -> io::Result<()> {
    writeln!(output, "{reply}")?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::serve;
    use stockbot_core::LedgerStore;

    #[test]
    fn serve_replies_to_each_command_line() {
        let store = LedgerStore::open_in_memory().unwrap();
        let input = "/addsku A Blue Saree 10\n\nhello\n/sell A 4\n/stock A\n";
        let mut output = Vec::new();

        serve(&store, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], "SKU A (Blue Saree) updated by +10. New qty: 10");
        assert!(lines[2].starts_with("Commands start with"));
        assert_eq!(lines[3], "Sold 4 of A. New qty: 6");
        assert_eq!(&lines[4..], &["SKU: A", "Name: Blue Saree", "Qty: 6"]);
    }
}
