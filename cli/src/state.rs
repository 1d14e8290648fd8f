use shared::{
    Config, ConversionHistory, ConversionService, DesktopNotifier, LogNotifier, MonitorConfig,
    Notifier, RateMonitor, RateProvider, XRatesProvider,
};
use std::sync::Arc;

pub type HandlerResult = Result<(), anyhow::Error>;

pub struct AppState {
    pub config: Config,
    pub provider: Arc<dyn RateProvider>,
    pub converter: ConversionService,
    pub history: ConversionHistory,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let provider: Arc<dyn RateProvider> = Arc::new(XRatesProvider::new(
            config.rate_source_url.clone(),
            config.http_timeout,
        )?);
        tracing::debug!("Using {} at {}", provider.name(), config.rate_source_url);

        let history = ConversionHistory::new(config.history_file.clone());
        let mut converter = ConversionService::new(Arc::clone(&provider));
        if config.history_enabled {
            converter = converter.with_history(history.clone());
        }

        let notifier: Arc<dyn Notifier> = if config.desktop_notifications {
            Arc::new(DesktopNotifier::with_app_name("Currency Vault"))
        } else {
            Arc::new(LogNotifier)
        };

        Ok(AppState {
            config,
            provider,
            converter,
            history,
            notifier,
        })
    }

    pub fn monitor(&self, config: MonitorConfig) -> RateMonitor {
        RateMonitor::new(Arc::clone(&self.provider), Arc::clone(&self.notifier), config)
            .with_notification_timeout(self.config.notification_timeout)
    }
}
