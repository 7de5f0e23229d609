use std::panic;

use anyhow::{anyhow, Context};
use colored::Colorize;
use env_logger::Env;
use log::{error, info};

use teller::config::Config;
use teller::console::Terminal;
use teller::currency::format_currency;
use teller::history::FileHistory;
use teller::session::{Session, SessionError};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("error")).init();

    // Panics are reported like any other failure below, without a backtrace.
    panic::set_hook(Box::new(|info| error!("panic: {info}")));

    let outcome = panic::catch_unwind(run).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown failure".to_owned());

        Err(anyhow!(message))
    });

    if let Err(e) = outcome {
        match e.downcast_ref::<SessionError>() {
            Some(SessionError::Cancelled) => {
                println!("\n\n{}", "Operation cancelled by user".red());
            }
            _ => {
                error!("{e:?}");
                println!("{}", format!("Unexpected error: {e:#}").red());
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::default();
    let history = FileHistory::new(&config.history_path);

    let mut session =
        Session::open(Terminal, Terminal, history, config).context("Failed opening session")?;

    let summary = session.run().context("Session aborted")?;

    info!(
        "session for {} ended with balance {}",
        summary.account_number,
        format_currency(summary.balance)
    );

    Ok(())
}
