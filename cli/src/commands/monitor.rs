use shared::{Currency, MonitorEvent};
use std::time::Duration;
use tracing::{info, warn};

use crate::state::{AppState, HandlerResult};

/// Run the rate monitor in the foreground until Ctrl-C.
pub async fn handle_monitor(
    state: &AppState,
    from: &str,
    to: &str,
    threshold: f64,
    interval: Option<u64>,
) -> HandlerResult {
    let from: Currency = from.parse()?;
    let to: Currency = to.parse()?;

    let mut config = state.config.monitor.clone();
    if let Some(secs) = interval {
        anyhow::ensure!(secs > 0, "--interval must be greater than zero");
        config.interval = Duration::from_secs(secs);
    }

    let mut handle = state
        .monitor(config)
        .start_monitor(from.code(), to.code(), threshold)?;

    println!(
        "Watching {}/{} for moves of at least {}. Press Ctrl-C to stop.",
        from, to, threshold
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, stopping monitor");
                break;
            }
            event = handle.next_event() => match event {
                Some(event) => print_event(&event),
                None => break,
            },
        }
    }

    for event in handle.stop().await? {
        print_event(&event);
    }
    Ok(())
}

fn print_event(event: &MonitorEvent) {
    match event {
        MonitorEvent::BaselineSet { rate } => println!("Baseline rate: {}", rate),
        MonitorEvent::RateChecked { rate, at } => {
            println!("[{}] rate {}", at.format("%H:%M:%S"), rate)
        }
        MonitorEvent::Alert(change) => println!("🔔 {}", change.message()),
        MonitorEvent::FetchFailed { attempt, error } => {
            warn!("Fetch attempt {} failed: {}", attempt, error)
        }
        MonitorEvent::CycleSkipped { error } => {
            println!("Check skipped, will retry next interval: {}", error)
        }
        MonitorEvent::Stopped => println!("Monitor stopped."),
    }
}
