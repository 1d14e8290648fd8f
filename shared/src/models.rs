use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// Currencies offered by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    JPY,
    AUD,
    CAD,
    CHF,
    CNY,
    NZD,
}

impl Currency {
    /// Every supported currency, in the order they are presented to the user.
    pub const ALL: [Currency; 10] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::INR,
        Currency::JPY,
        Currency::AUD,
        Currency::CAD,
        Currency::CHF,
        Currency::CNY,
        Currency::NZD,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::CNY => "CNY",
            Currency::NZD => "NZD",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "United States Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::INR => "Indian Rupee",
            Currency::JPY => "Japanese Yen",
            Currency::AUD => "Australian Dollar",
            Currency::CAD => "Canadian Dollar",
            Currency::CHF => "Swiss Franc",
            Currency::CNY => "Chinese Yuan",
            Currency::NZD => "New Zealand Dollar",
        }
    }

    /// Picker label, e.g. `USD - United States Dollar`
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name())
    }

    /// All supported currencies except `self`.
    pub fn others(&self) -> impl Iterator<Item = Currency> + '_ {
        Currency::ALL.into_iter().filter(move |c| c != self)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ConvertError;

    /// Accepts a bare code (`usd`, `USD`) or a picker label
    /// (`USD - United States Dollar`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.split(" - ").next().unwrap_or_default().trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ConvertError::UnknownCurrency(s.trim().to_string()))
    }
}

/// One row of the conversion history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    #[serde(rename = "Base Currency")]
    pub base_currency: String,
    #[serde(rename = "Target Currency")]
    pub target_currency: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Result")]
    pub result: f64,
}

/// Outcome of a single conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub from: Currency,
    pub to: Currency,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
}

impl Conversion {
    pub fn record(&self) -> ConversionRecord {
        ConversionRecord {
            base_currency: self.from.code().to_string(),
            target_currency: self.to.code().to_string(),
            amount: self.amount,
            result: self.result,
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {:.2} {}", self.amount, self.from, self.result, self.to)
    }
}

/// One bar of a comparison: the amount expressed in `target`, or why it
/// could not be.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub target: Currency,
    pub value: Result<f64, String>,
}

/// An amount of `source` expressed in every other supported currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub source: Currency,
    pub amount: f64,
    pub entries: Vec<ComparisonEntry>,
}

impl Comparison {
    /// Largest successfully converted value, used to scale bar charts.
    pub fn max_value(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.value.as_ref().ok().copied())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// A rate move large enough to report.
#[derive(Debug, Clone, PartialEq)]
pub struct RateChange {
    pub from: String,
    pub to: String,
    pub old_rate: f64,
    pub new_rate: f64,
    pub observed_at: DateTime<Utc>,
}

impl RateChange {
    pub fn delta(&self) -> f64 {
        self.new_rate - self.old_rate
    }

    pub fn message(&self) -> String {
        format!(
            "{} to {} rate changed: {:.2} -> {:.2}",
            self.from, self.to, self.old_rate, self.new_rate
        )
    }
}
