use dotenv::dotenv;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_RATE_SOURCE_URL: &str = "https://www.x-rates.com/calculator/";
pub const DEFAULT_HISTORY_FILE: &str = "conversion_history.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub rate_source_url: String,
    pub http_timeout: Duration,
    pub history_file: PathBuf,
    pub history_enabled: bool,
    pub monitor: MonitorConfig,
    pub notification_timeout: Duration,
    pub desktop_notifications: bool,
}

/// Timing knobs for the background rate monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Pause between two checks of the same pair
    pub interval: Duration,
    /// Extra attempts per check after the first failed fetch
    pub max_retries: u32,
    /// First backoff delay; doubled on every further attempt
    pub backoff_base: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate_source_url: DEFAULT_RATE_SOURCE_URL.to_string(),
            http_timeout: Duration::from_secs(15),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            history_enabled: true,
            monitor: MonitorConfig::default(),
            notification_timeout: Duration::from_secs(10),
            desktop_notifications: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let defaults = Config::default();
        let config = Config {
            rate_source_url: std::env::var("RATE_SOURCE_URL")
                .unwrap_or_else(|_| defaults.rate_source_url.clone()),
            http_timeout: Duration::from_secs(env_or("HTTP_TIMEOUT_SECS", 15)),
            history_file: std::env::var("HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_file),
            history_enabled: env_or("HISTORY_ENABLED", true),
            monitor: MonitorConfig {
                interval: Duration::from_secs(env_or("MONITOR_INTERVAL_SECS", 60)),
                max_retries: env_or("MONITOR_MAX_RETRIES", 3),
                backoff_base: Duration::from_millis(env_or("MONITOR_BACKOFF_MS", 500)),
            },
            notification_timeout: Duration::from_secs(env_or("NOTIFICATION_TIMEOUT_SECS", 10)),
            desktop_notifications: env_or("DESKTOP_NOTIFICATIONS", true),
        };

        // only the monitor needs a non-zero interval; it rejects zero itself
        if config.monitor.interval.is_zero() {
            tracing::warn!("MONITOR_INTERVAL_SECS is 0; the monitor will refuse to start");
        }

        Ok(config)
    }
}

/// Reads `key` from the environment, falling back to `default` when the
/// variable is missing or does not parse.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {:?}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rate_source_url, DEFAULT_RATE_SOURCE_URL);
        assert_eq!(config.history_file, PathBuf::from("conversion_history.csv"));
        assert_eq!(config.monitor.interval, Duration::from_secs(60));
        assert_eq!(config.notification_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("CURRENCY_VAULT_TEST_RETRIES", "lots");
        assert_eq!(env_or::<u32>("CURRENCY_VAULT_TEST_RETRIES", 3), 3);

        std::env::set_var("CURRENCY_VAULT_TEST_RETRIES", " 7 ");
        assert_eq!(env_or::<u32>("CURRENCY_VAULT_TEST_RETRIES", 3), 7);

        std::env::remove_var("CURRENCY_VAULT_TEST_RETRIES");
        assert!(env_or("CURRENCY_VAULT_TEST_FLAG_MISSING", true));
    }

    #[test]
    fn test_zero_interval_still_loads() {
        std::env::set_var("MONITOR_INTERVAL_SECS", "0");
        let config = Config::from_env();
        std::env::remove_var("MONITOR_INTERVAL_SECS");

        let config = config.unwrap();
        assert!(config.monitor.interval.is_zero());
    }
}
