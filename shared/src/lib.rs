//! Currency conversion core: rate providers, conversion and comparison,
//! the CSV conversion history, desktop notifications and the background
//! rate monitor.

pub mod config;
pub mod converter;
pub mod error;
pub mod history;
pub mod models;
pub mod monitor;
pub mod notifier;
pub mod rates;

pub use config::{Config, MonitorConfig};
pub use converter::{convert, parse_amount, ConversionService};
pub use error::{ConvertError, FetchError, HistoryError, MonitorError, NotifyError};
pub use history::ConversionHistory;
pub use models::*;
pub use monitor::{MonitorEvent, MonitorHandle, RateMonitor, ThresholdTracker};
pub use notifier::{DesktopNotifier, LogNotifier, Notification, Notifier};
pub use rates::{extract_rate, fetch_rate, RateProvider, XRatesProvider};
