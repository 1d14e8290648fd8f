//! Exchange rate providers
//!
//! A provider turns a currency pair into a positive multiplier
//! ("1 unit of `from` = rate units of `to`"). The only shipped provider
//! scrapes the x-rates calculator page; anything else (a JSON API, a fixed
//! table for tests) plugs in through [`RateProvider`].

pub mod x_rates;

pub use x_rates::{extract_rate, XRatesProvider};

use async_trait::async_trait;

use crate::error::FetchError;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch the current rate for `from` -> `to`.
    ///
    /// Implementations perform no retries; a single failure is returned as is.
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<f64, FetchError>;
}

/// Fetch a rate through `provider`, enforcing the contract every caller
/// relies on: both codes are non-empty and the returned rate is positive.
pub async fn fetch_rate(
    provider: &dyn RateProvider,
    from: &str,
    to: &str,
) -> Result<f64, FetchError> {
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(FetchError::EmptyCode);
    }

    let rate = provider.fetch_rate(from, to).await.map_err(|e| {
        tracing::warn!("{} failed to fetch {}/{}: {}", provider.name(), from, to, e);
        e
    })?;
    ensure_positive(rate)?;

    tracing::debug!("{} rate {}/{} = {}", provider.name(), from, to, rate);
    Ok(rate)
}

pub(crate) fn ensure_positive(rate: f64) -> Result<f64, FetchError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(FetchError::NonPositive(rate))
    }
}
