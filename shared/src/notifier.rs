use async_trait::async_trait;
use std::time::Duration;

use crate::error::NotifyError;
use crate::models::RateChange;

pub const ALERT_TITLE: &str = "Exchange Rate Alert!";

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub timeout: Duration,
}

impl Notification {
    pub fn rate_alert(change: &RateChange, timeout: Duration) -> Self {
        Self {
            title: ALERT_TITLE.to_string(),
            message: change.message(),
            timeout,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// OS-level popup through the platform notification service.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    app_name: Option<String>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: Some(app_name.into()),
        }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let notification = notification.clone();
        let app_name = self.app_name.clone();

        // notify-rust talks to the session bus synchronously
        tokio::task::spawn_blocking(move || {
            let mut popup = notify_rust::Notification::new();
            popup
                .summary(&notification.title)
                .body(&notification.message)
                .timeout(notify_rust::Timeout::Milliseconds(
                    notification.timeout.as_millis().min(u32::MAX as u128) as u32,
                ));
            if let Some(app_name) = app_name.as_deref() {
                popup.appname(app_name);
            }
            popup
                .show()
                .map(|_| ())
                .map_err(|e| NotifyError::Desktop(e.to_string()))
        })
        .await?
    }
}

/// Headless fallback: alerts only go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!("🔔 {}: {}", notification.title, notification.message);
        Ok(())
    }
}
