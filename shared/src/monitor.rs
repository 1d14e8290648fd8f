//! Background rate monitor
//!
//! Watches one currency pair on a fixed interval and raises a notification
//! whenever the rate has moved by at least a threshold since the last alert
//! (or since the first observation). The monitor runs as a tokio task owned by
//! a [`MonitorHandle`]; stopping or dropping the handle ends the task.
//!
//! Fetch failures are retried with exponential backoff and reported on the
//! handle's event channel. A check whose retries are all exhausted is skipped
//! and the monitor carries on at the next interval.
//!
//! Notifications run on their own task so a slow or stuck notifier never
//! delays the next check or a stop request.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::models::RateChange;
use crate::notifier::{Notification, Notifier};
use crate::rates::{fetch_rate, RateProvider};

/// Events buffered for a handle that is not being read; newer events are
/// dropped once it is full.
pub const EVENT_BUFFER: usize = 64;

/// Threshold rule for a single pair, independent of timing and I/O.
#[derive(Debug, Clone)]
pub struct ThresholdTracker {
    from: String,
    to: String,
    threshold: f64,
    baseline: Option<f64>,
}

impl ThresholdTracker {
    pub fn new(from: &str, to: &str, threshold: f64) -> Result<Self, MonitorError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(MonitorError::InvalidThreshold(threshold));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            threshold,
            baseline: None,
        })
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed a freshly fetched rate.
    ///
    /// The first observation only sets the baseline. Later observations that
    /// differ from the baseline by at least the threshold return the change
    /// and become the new baseline; smaller moves leave the baseline alone.
    pub fn observe(&mut self, rate: f64) -> Option<RateChange> {
        let Some(baseline) = self.baseline else {
            self.baseline = Some(rate);
            return None;
        };

        if (rate - baseline).abs() >= self.threshold {
            self.baseline = Some(rate);
            Some(RateChange {
                from: self.from.clone(),
                to: self.to.clone(),
                old_rate: baseline,
                new_rate: rate,
                observed_at: Utc::now(),
            })
        } else {
            None
        }
    }
}

/// Observable progress of a running monitor.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// First successful fetch; comparisons start from here
    BaselineSet { rate: f64 },
    /// A scheduled check succeeded
    RateChecked { rate: f64, at: DateTime<Utc> },
    /// The rate crossed the threshold and a notification was dispatched
    Alert(RateChange),
    /// One fetch attempt failed (attempts are 1-based)
    FetchFailed { attempt: u32, error: String },
    /// Every attempt of a check failed; the check is skipped
    CycleSkipped { error: String },
    Stopped,
}

/// Owner of a running monitor task.
///
/// Dropping the handle signals the task to stop at its next await point.
pub struct MonitorHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
    events: mpsc::Receiver<MonitorEvent>,
}

impl MonitorHandle {
    /// Wait for the next event. Returns `None` once the task has finished and
    /// every event has been read.
    pub async fn next_event(&mut self) -> Option<MonitorEvent> {
        self.events.recv().await
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the task to stop, wait for it to finish and return the events
    /// that were not read yet (the last one is always [`MonitorEvent::Stopped`]).
    pub async fn stop(mut self) -> Result<Vec<MonitorEvent>, MonitorError> {
        let _ = self.stop_tx.send(true);
        (&mut self.task).await?;

        let mut remaining = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            remaining.push(event);
        }
        // a full buffer may have swallowed the worker's own Stopped
        if remaining.last() != Some(&MonitorEvent::Stopped) {
            remaining.push(MonitorEvent::Stopped);
        }
        Ok(remaining)
    }
}

pub struct RateMonitor {
    provider: Arc<dyn RateProvider>,
    notifier: Arc<dyn Notifier>,
    config: MonitorConfig,
    notification_timeout: Duration,
}

impl RateMonitor {
    pub fn new(
        provider: Arc<dyn RateProvider>,
        notifier: Arc<dyn Notifier>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            provider,
            notifier,
            config,
            notification_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    /// Start watching `from` -> `to` in the background.
    pub fn start_monitor(
        &self,
        from: &str,
        to: &str,
        threshold: f64,
    ) -> Result<MonitorHandle, MonitorError> {
        if self.config.interval.is_zero() {
            return Err(MonitorError::ZeroInterval);
        }
        let tracker = ThresholdTracker::new(from, to, threshold)?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let (events_tx, events) = mpsc::channel(EVENT_BUFFER);

        let worker = MonitorWorker {
            provider: Arc::clone(&self.provider),
            notifier: Arc::clone(&self.notifier),
            config: self.config.clone(),
            notification_timeout: self.notification_timeout,
            from: from.to_string(),
            to: to.to_string(),
            events: events_tx,
        };

        info!(
            "Monitoring {}/{} every {:?} (threshold {})",
            from, to, self.config.interval, threshold
        );
        let task = tokio::spawn(worker.run(tracker, stop_rx));

        Ok(MonitorHandle {
            stop_tx,
            task,
            events,
        })
    }
}

enum FetchOutcome {
    Rate(f64),
    Failed(String),
    Stopped,
}

struct MonitorWorker {
    provider: Arc<dyn RateProvider>,
    notifier: Arc<dyn Notifier>,
    config: MonitorConfig,
    notification_timeout: Duration,
    from: String,
    to: String,
    events: mpsc::Sender<MonitorEvent>,
}

impl MonitorWorker {
    async fn run(self, mut tracker: ThresholdTracker, mut stop_rx: watch::Receiver<bool>) {
        let mut first_check = true;

        loop {
            if !first_check && pause(self.config.interval, &mut stop_rx).await {
                break;
            }
            first_check = false;

            let rate = match self.fetch_with_retry(&mut stop_rx).await {
                FetchOutcome::Rate(rate) => rate,
                FetchOutcome::Failed(error) => {
                    warn!("Skipping {}/{} check: {}", self.from, self.to, error);
                    self.emit(MonitorEvent::CycleSkipped { error });
                    continue;
                }
                FetchOutcome::Stopped => break,
            };

            if tracker.baseline().is_none() {
                tracker.observe(rate);
                debug!("Baseline for {}/{} set to {}", self.from, self.to, rate);
                self.emit(MonitorEvent::BaselineSet { rate });
                continue;
            }

            self.emit(MonitorEvent::RateChecked { rate, at: Utc::now() });
            if let Some(change) = tracker.observe(rate) {
                self.alert(change);
            }
        }

        info!("Monitor for {}/{} stopped", self.from, self.to);
        self.emit(MonitorEvent::Stopped);
    }

    async fn fetch_with_retry(&self, stop_rx: &mut watch::Receiver<bool>) -> FetchOutcome {
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 && pause(self.backoff(attempt - 1), stop_rx).await {
                return FetchOutcome::Stopped;
            }

            let result = tokio::select! {
                result = fetch_rate(self.provider.as_ref(), &self.from, &self.to) => result,
                _ = wait_for_stop(stop_rx) => return FetchOutcome::Stopped,
            };

            match result {
                Ok(rate) => return FetchOutcome::Rate(rate),
                Err(e) => {
                    last_error = e.to_string();
                    self.emit(MonitorEvent::FetchFailed {
                        attempt: attempt + 1,
                        error: last_error.clone(),
                    });
                }
            }
        }

        FetchOutcome::Failed(last_error)
    }

    /// Delay before retry number `n + 1`: `backoff_base * 2^n`, never longer
    /// than the check interval.
    fn backoff(&self, n: u32) -> Duration {
        let factor = 1u32.checked_shl(n).unwrap_or(u32::MAX);
        self.config
            .backoff_base
            .saturating_mul(factor)
            .min(self.config.interval)
    }

    fn alert(&self, change: RateChange) {
        info!("{}", change.message());
        let notification = Notification::rate_alert(&change, self.notification_timeout);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&notification).await {
                warn!("Could not deliver rate alert: {}", e);
            }
        });
        self.emit(MonitorEvent::Alert(change));
    }

    fn emit(&self, event: MonitorEvent) {
        // Nobody listening is fine; the monitor keeps going.
        if let Err(mpsc::error::TrySendError::Full(event)) = self.events.try_send(event) {
            debug!("Event buffer full, dropping {:?}", event);
        }
    }
}

/// Sleep for `duration` unless a stop is requested first. Returns `true` when
/// the monitor should stop.
async fn pause(duration: Duration, stop_rx: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = wait_for_stop(stop_rx) => true,
    }
}

/// Resolves once stop was requested or the handle was dropped.
async fn wait_for_stop(stop_rx: &mut watch::Receiver<bool>) {
    loop {
        if *stop_rx.borrow() {
            return;
        }
        if stop_rx.changed().await.is_err() {
            return;
        }
    }
}
