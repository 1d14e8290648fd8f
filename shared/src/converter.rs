//! Currency conversion on top of a rate provider

use futures::future::join_all;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::history::ConversionHistory;
use crate::models::{Comparison, ComparisonEntry, Conversion, Currency};
use crate::rates::{fetch_rate, RateProvider};

/// Parse user input for an amount.
pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ConvertError::InvalidAmount(trimmed.to_string())),
    }
}

pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

pub struct ConversionService {
    provider: Arc<dyn RateProvider>,
    history: Option<ConversionHistory>,
}

impl ConversionService {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            provider,
            history: None,
        }
    }

    /// Record every successful conversion in `history`.
    pub fn with_history(mut self, history: ConversionHistory) -> Self {
        self.history = Some(history);
        self
    }

    pub fn history(&self) -> Option<&ConversionHistory> {
        self.history.as_ref()
    }

    pub fn provider(&self) -> Arc<dyn RateProvider> {
        Arc::clone(&self.provider)
    }

    pub async fn rate(&self, from: Currency, to: Currency) -> Result<f64, ConvertError> {
        Ok(fetch_rate(self.provider.as_ref(), from.code(), to.code()).await?)
    }

    /// Convert `amount` of `from` into `to` at the current rate.
    ///
    /// A failed history write is logged; the conversion itself still succeeds.
    pub async fn convert(
        &self,
        from: Currency,
        to: Currency,
        amount: f64,
    ) -> Result<Conversion, ConvertError> {
        let rate = self.rate(from, to).await?;
        let conversion = Conversion {
            from,
            to,
            amount,
            rate,
            result: convert(amount, rate),
        };
        tracing::info!("{} (rate {})", conversion, rate);

        if let Some(history) = &self.history {
            if let Err(e) = history.append(&conversion.record()) {
                tracing::error!("Failed to save conversion to {}: {}", history.path().display(), e);
            }
        }

        Ok(conversion)
    }

    /// Express `amount` of `source` in every other supported currency.
    ///
    /// Rates are fetched concurrently; a failed target keeps its error message
    /// instead of failing the whole comparison.
    pub async fn compare(&self, source: Currency, amount: f64) -> Comparison {
        let targets: Vec<Currency> = source.others().collect();
        let fetches = targets
            .iter()
            .map(|target| fetch_rate(self.provider.as_ref(), source.code(), target.code()));
        let rates = join_all(fetches).await;

        let entries = targets
            .into_iter()
            .zip(rates)
            .map(|(target, rate)| ComparisonEntry {
                target,
                value: rate.map(|r| convert(amount, r)).map_err(|e| e.to_string()),
            })
            .collect();

        Comparison {
            source,
            amount,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100").unwrap(), 100.0);
        assert_eq!(parse_amount(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_amount("-3").unwrap(), -3.0);
        assert!(matches!(parse_amount("abc"), Err(ConvertError::InvalidAmount(_))));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_convert_multiplies() {
        assert_eq!(convert(100.0, 0.90), 90.0);
        assert_eq!(format!("{:.2}", convert(100.0, 0.90)), "90.00");
        assert_eq!(convert(0.0, 83.2), 0.0);
    }
}
