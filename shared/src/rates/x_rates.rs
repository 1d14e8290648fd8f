//! Rate provider backed by the x-rates.com calculator page

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;

use super::{ensure_positive, RateProvider};
use crate::error::FetchError;

/// The result span; the page splits the number across nested spans, e.g.
/// `<span class="ccOutputRslt">0.92<span class="ccOutputTrail">1234</span>...`
const RESULT_SELECTOR: &str = "span.ccOutputRslt";

fn result_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(RESULT_SELECTOR).expect("result selector is valid CSS"))
}

#[derive(Debug, Clone)]
pub struct XRatesProvider {
    base_url: String,
    client: reqwest::Client,
}

impl XRatesProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Build the lookup request for one unit of `from` priced in `to`.
    pub fn build_request(&self, from: &str, to: &str) -> Result<reqwest::Request, FetchError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("from", from), ("to", to), ("amount", "1")])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl RateProvider for XRatesProvider {
    fn name(&self) -> &str {
        "x-rates"
    }

    async fn fetch_rate(&self, from: &str, to: &str) -> Result<f64, FetchError> {
        let request = self.build_request(from, to)?;
        tracing::debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        extract_rate(&body)
    }
}

/// Pull the rate out of a rate-lookup page.
///
/// All text under the first result span is concatenated, then everything
/// except ASCII digits and `.` is dropped before parsing.
pub fn extract_rate(html: &str) -> Result<f64, FetchError> {
    let document = Html::parse_document(html);
    let element = document
        .select(result_selector())
        .next()
        .ok_or(FetchError::MissingElement)?;

    let raw: String = element.text().collect();
    let cleaned = clean_rate_text(&raw);
    let rate = cleaned
        .parse::<f64>()
        .map_err(|_| FetchError::InvalidNumber(raw.trim().to_string()))?;

    ensure_positive(rate)
}

fn clean_rate_text(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}
