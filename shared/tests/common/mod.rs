#![allow(dead_code)]

use async_trait::async_trait;
use shared::{FetchError, Notification, Notifier, NotifyError, RateProvider};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Provider that replays a fixed script of responses, then keeps failing.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<f64, String>>>,
    calls: Mutex<usize>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<f64, &str>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|r| r.map_err(|e| e.to_string()))
                    .collect(),
            ),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl RateProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_rate(&self, _from: &str, _to: &str) -> Result<f64, FetchError> {
        *self.calls.lock().unwrap() += 1;
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(rate)) => Ok(rate),
            Some(Err(msg)) => Err(FetchError::InvalidNumber(msg)),
            None => Err(FetchError::MissingElement),
        }
    }
}

/// Provider with a fixed rate per target currency.
pub struct TableProvider {
    rates: HashMap<String, f64>,
}

impl TableProvider {
    pub fn new(rates: &[(&str, f64)]) -> Arc<Self> {
        Arc::new(Self {
            rates: rates.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        })
    }
}

#[async_trait]
impl RateProvider for TableProvider {
    fn name(&self) -> &str {
        "table"
    }

    async fn fetch_rate(&self, _from: &str, to: &str) -> Result<f64, FetchError> {
        self.rates.get(to).copied().ok_or(FetchError::MissingElement)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Notifier whose delivery never finishes, like a desktop bus that stopped
/// answering.
#[derive(Default)]
pub struct StuckNotifier {
    pub attempts: Mutex<usize>,
}

impl StuckNotifier {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for StuckNotifier {
    async fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
        *self.attempts.lock().unwrap() += 1;
        std::future::pending().await
    }
}

pub fn temp_csv() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("currency-vault-{}", uuid::Uuid::new_v4()))
        .join("conversion_history.csv")
}
