use anyhow::Context;
use shared::{parse_amount, Comparison, Currency};
use std::fmt::Write;

use crate::state::{AppState, HandlerResult};

const BAR_WIDTH: usize = 40;

pub async fn handle_convert(
    state: &AppState,
    from: &str,
    to: &str,
    amount: &str,
    compare: bool,
) -> HandlerResult {
    let from: Currency = from.parse()?;
    let to: Currency = to.parse()?;
    let amount = parse_amount(amount)?;

    let conversion = state
        .converter
        .convert(from, to, amount)
        .await
        .context("Conversion failed. Try again.")?;
    println!("{}", conversion);

    if compare {
        let comparison = state.converter.compare(from, amount).await;
        print!("{}", render_comparison(&comparison));
    }

    Ok(())
}

pub async fn handle_rate(state: &AppState, from: &str, to: &str) -> HandlerResult {
    let from: Currency = from.parse()?;
    let to: Currency = to.parse()?;

    let rate = state.converter.rate(from, to).await?;
    println!("1 {} = {} {}", from, rate, to);
    Ok(())
}

pub async fn handle_compare(state: &AppState, from: &str, amount: &str) -> HandlerResult {
    let from: Currency = from.parse()?;
    let amount = parse_amount(amount)?;

    let comparison = state.converter.compare(from, amount).await;
    print!("{}", render_comparison(&comparison));
    Ok(())
}

pub fn handle_currencies() -> HandlerResult {
    for currency in Currency::ALL {
        println!("{}", currency.label());
    }
    Ok(())
}

/// Horizontal bar chart of a comparison, one line per target currency.
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparison of {} {} with Other Currencies",
        comparison.amount, comparison.source
    );

    let max = comparison.max_value().unwrap_or(0.0).abs();
    for entry in &comparison.entries {
        match &entry.value {
            Ok(value) => {
                // any non-zero value gets at least one block
                let len = if max > 0.0 && *value != 0.0 {
                    (((value.abs() / max) * BAR_WIDTH as f64).round() as usize).max(1)
                } else {
                    0
                };
                let _ = writeln!(
                    out,
                    "{} | {:<width$} {:.2}",
                    entry.target,
                    "█".repeat(len),
                    value,
                    width = BAR_WIDTH
                );
            }
            Err(error) => {
                let _ = writeln!(out, "{} | unavailable: {}", entry.target, error);
            }
        }
    }
    out
}
