use clap::Subcommand;

pub mod convert;
pub mod history;
pub mod monitor;
pub mod version;

pub use convert::{handle_compare, handle_convert, handle_currencies, handle_rate};
pub use history::handle_history;
pub use monitor::handle_monitor;
pub use version::handle_version;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert an amount between two currencies
    Convert {
        /// Currency to convert from, e.g. USD
        from: String,
        /// Currency to convert to, e.g. EUR
        to: String,
        /// Amount of the source currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Also show the amount in every other supported currency
        #[arg(long)]
        compare: bool,
        /// Do not append this conversion to the history file
        #[arg(long)]
        no_history: bool,
    },
    /// Show the current exchange rate for a pair
    Rate { from: String, to: String },
    /// Show an amount in every other supported currency
    Compare {
        from: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Print the conversion history
    History,
    /// Watch a pair and notify when the rate moves by at least the threshold
    Monitor {
        from: String,
        to: String,
        /// Minimum absolute rate change that triggers a notification
        #[arg(long)]
        threshold: f64,
        /// Seconds between checks (defaults to MONITOR_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// List supported currencies
    Currencies,
    /// Show build information
    Version,
}
