use thiserror::Error;

/// Failure to obtain a rate from a provider.
///
/// Callers show the `Display` form as-is; the variants only exist so that
/// logs and tests can tell the causes apart.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("currency code must not be empty")]
    EmptyCode,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate page returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("exchange rate not found on the webpage")]
    MissingElement,

    #[error("could not parse exchange rate from {0:?}")]
    InvalidNumber(String),

    #[error("exchange rate must be positive, got {0}")]
    NonPositive(f64),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("please enter a valid amount (got {0:?})")]
    InvalidAmount(String),

    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),

    #[error("could not fetch exchange rate: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history format error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("monitor interval must be greater than zero")]
    ZeroInterval,

    #[error("monitor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("desktop notification failed: {0}")]
    Desktop(String),

    #[error("notification task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
