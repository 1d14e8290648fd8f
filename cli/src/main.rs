use anyhow::Result;
use clap::Parser;
use shared::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod state;

use crate::commands::{
    handle_compare, handle_convert, handle_currencies, handle_history, handle_monitor,
    handle_rate, handle_version, Command,
};
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "currency-vault", author, version, about = "Currency converter with live rates, history and rate alerts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut config = Config::from_env()?;

    if let Command::Convert { no_history: true, .. } = cli.command {
        config.history_enabled = false;
    }

    // Commands that need no network or files
    match &cli.command {
        Command::Currencies => return handle_currencies(),
        Command::Version => return handle_version(),
        _ => {}
    }

    let state = AppState::new(config)?;
    tracing::debug!("AppState initialized");

    match cli.command {
        Command::Convert {
            from,
            to,
            amount,
            compare,
            ..
        } => handle_convert(&state, &from, &to, &amount, compare).await,
        Command::Rate { from, to } => handle_rate(&state, &from, &to).await,
        Command::Compare { from, amount } => handle_compare(&state, &from, &amount).await,
        Command::History => handle_history(&state),
        Command::Monitor {
            from,
            to,
            threshold,
            interval,
        } => handle_monitor(&state, &from, &to, threshold, interval).await,
        Command::Currencies | Command::Version => Ok(()),
    }
}
