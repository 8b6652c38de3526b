//! Hot-reloadable configuration
//!
//! SIGHUP re-reads the layered configuration. A new configuration is only
//! swapped in when its placement rules are usable; otherwise the previous
//! one stays active. Requests pick up the region rules of whichever
//! configuration is current when they start.

use std::sync::Arc;

use application::ApplicationError;
use arc_swap::ArcSwap;
use infrastructure::AppConfig;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// `AppConfig` behind an atomic pointer, with a change counter
#[derive(Debug, Clone)]
pub struct ReloadableConfig {
    inner: Arc<ArcSwap<AppConfig>>,
    notify: watch::Sender<u64>,
    receiver: watch::Receiver<u64>,
}

impl ReloadableConfig {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let (notify, receiver) = watch::channel(0);
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(config))),
            notify,
            receiver,
        }
    }

    /// Current configuration
    #[must_use]
    pub fn load(&self) -> Arc<AppConfig> {
        self.inner.load_full()
    }

    /// Re-read the configuration sources and swap on success
    pub fn reload(&self) -> bool {
        match AppConfig::load() {
            Ok(config) => match self.replace(config) {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Reloaded configuration rejected");
                    false
                },
            },
            Err(e) => {
                error!(error = %e, "Failed to reload configuration");
                false
            },
        }
    }

    /// Swap in `config` if its placement rules are valid
    pub fn replace(&self, config: AppConfig) -> Result<(), ApplicationError> {
        let rules = config.placement.location_rules()?;
        let previous = self.inner.swap(Arc::new(config));

        info!(
            region_center = %rules.region_center,
            region_radius_km = rules.region_radius_km,
            previous_radius_km = previous.placement.region_radius_km,
            "Configuration reloaded"
        );

        self.notify.send_modify(|version| *version += 1);
        Ok(())
    }

    /// Change notifications; the value counts successful reloads
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }
}

/// Reload on SIGHUP for the lifetime of the process
#[cfg(unix)]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    use tokio::signal::unix::{SignalKind, signal};

    let handle = config.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "Failed to install SIGHUP handler");
                return;
            },
        };

        while sighup.recv().await.is_some() {
            info!("Received SIGHUP, reloading configuration");
            if !handle.reload() {
                warn!("Keeping previous configuration");
            }
        }
    });

    config
}

#[cfg(not(unix))]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    warn!("SIGHUP config reload not supported on this platform");
    config
}
