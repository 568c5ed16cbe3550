//! System health metrics from Glances, with simulated fallback

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use shared::{ConnectionTestResult, GlancesSettings, MetricsSource, SystemHealth};

use crate::error::AppResult;
use crate::external::GlancesClient;
use crate::services::SettingsService;

#[derive(Clone)]
pub struct SystemHealthService {
    settings: SettingsService,
    http: Client,
    timeout: Duration,
}

/// Plausible-looking metrics for when no monitoring backend is configured
pub fn simulated_health<R: Rng + ?Sized>(rng: &mut R) -> SystemHealth {
    SystemHealth {
        cpu: rng.gen_range(10..50),
        memory: rng.gen_range(30..80),
        storage: rng.gen_range(20..80),
        network_status: "Optimal".to_string(),
        network_down: rng.gen_range(50..250),
        network_up: rng.gen_range(25..125),
        source: MetricsSource::Simulated,
    }
}

impl SystemHealthService {
    pub fn new(settings: SettingsService, http: Client, timeout: Duration) -> Self {
        Self {
            settings,
            http,
            timeout,
        }
    }

    /// Current metrics. Any failure, including unreadable settings, degrades
    /// to simulated values.
    pub async fn current(&self) -> AppResult<SystemHealth> {
        let settings = match self.settings.glances().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Could not load Glances settings, using simulated metrics: {}", e);
                return Ok(simulated_health(&mut rand::thread_rng()));
            }
        };

        if settings.enabled {
            let client = GlancesClient::new(self.http.clone(), settings.clone(), self.timeout);
            match client.fetch_health().await {
                Ok(health) => return Ok(health),
                Err(e) => tracing::warn!(
                    "Glances at {} unavailable, using simulated metrics: {}",
                    settings.url,
                    e
                ),
            }
        }

        Ok(simulated_health(&mut rand::thread_rng()))
    }

    /// Try the given settings without saving them. A blank password falls
    /// back to the stored one.
    pub async fn test_connection(&self, candidate: GlancesSettings) -> AppResult<ConnectionTestResult> {
        let stored = self.settings.glances().await?;
        let settings = match candidate.merged_with(&stored) {
            Ok(settings) => settings,
            Err(e) => return Ok(ConnectionTestResult::failed(e.to_string())),
        };

        let client = GlancesClient::new(self.http.clone(), settings, self.timeout);
        Ok(match client.test_connection().await {
            Ok(()) => ConnectionTestResult::ok(),
            Err(e) => ConnectionTestResult::failed(e.to_string()),
        })
    }
}
