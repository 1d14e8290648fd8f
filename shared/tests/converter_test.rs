//! Conversion, comparison and history tests against stubbed providers

mod common;

use common::{temp_csv, ScriptedProvider, TableProvider};
use shared::{ConversionHistory, ConversionService, ConvertError, Currency, FetchError};
use std::fs;

#[tokio::test]
async fn test_usd_to_eur_at_stubbed_rate() {
    let provider = ScriptedProvider::new(vec![Ok(0.90)]);
    let service = ConversionService::new(provider);

    let conversion = service
        .convert(Currency::USD, Currency::EUR, 100.0)
        .await
        .unwrap();

    assert_eq!(conversion.rate, 0.90);
    assert_eq!(conversion.result, 90.0);
    assert_eq!(conversion.to_string(), "100 USD = 90.00 EUR");
}

#[tokio::test]
async fn test_failed_fetch_yields_error_not_panic() {
    let provider = ScriptedProvider::new(vec![]);
    let service = ConversionService::new(provider);

    let err = service
        .convert(Currency::USD, Currency::EUR, 1.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::Fetch(FetchError::MissingElement)));
    assert_eq!(
        err.to_string(),
        "could not fetch exchange rate: exchange rate not found on the webpage"
    );
}

#[tokio::test]
async fn test_conversions_are_logged() {
    let path = temp_csv();
    let provider = ScriptedProvider::new(vec![Ok(0.90), Ok(83.25), Ok(1.5)]);
    let service = ConversionService::new(provider).with_history(ConversionHistory::new(&path));

    service.convert(Currency::USD, Currency::EUR, 100.0).await.unwrap();
    service.convert(Currency::USD, Currency::INR, 2.0).await.unwrap();
    service.convert(Currency::GBP, Currency::CAD, 10.0).await.unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Base Currency,Target Currency,Amount,Result",
            "USD,EUR,100.0,90.0",
            "USD,INR,2.0,166.5",
            "GBP,CAD,10.0,15.0",
        ]
    );

    fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[tokio::test]
async fn test_failed_conversion_is_not_logged() {
    let path = temp_csv();
    let provider = ScriptedProvider::new(vec![Err("n/a")]);
    let service = ConversionService::new(provider).with_history(ConversionHistory::new(&path));

    assert!(service.convert(Currency::USD, Currency::EUR, 5.0).await.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_compare_covers_every_other_currency() {
    let provider = TableProvider::new(&[
        ("EUR", 0.9),
        ("GBP", 0.8),
        ("INR", 83.0),
        ("JPY", 150.0),
        ("AUD", 1.5),
        ("CAD", 1.35),
        ("CHF", 0.88),
        ("CNY", 7.2),
    ]);
    let service = ConversionService::new(provider);

    let comparison = service.compare(Currency::USD, 10.0).await;

    assert_eq!(comparison.source, Currency::USD);
    assert_eq!(comparison.entries.len(), Currency::ALL.len() - 1);
    assert!(comparison.entries.iter().all(|e| e.target != Currency::USD));

    let targets: Vec<Currency> = comparison.entries.iter().map(|e| e.target).collect();
    assert_eq!(targets, Currency::USD.others().collect::<Vec<_>>());

    assert_eq!(comparison.entries[0].value, Ok(9.0));
    assert_eq!(comparison.max_value(), Some(1500.0));

    // NZD is missing from the table
    let nzd = comparison
        .entries
        .iter()
        .find(|e| e.target == Currency::NZD)
        .unwrap();
    assert_eq!(
        nzd.value,
        Err("exchange rate not found on the webpage".to_string())
    );
}
