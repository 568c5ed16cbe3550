//! Glances REST API client
//!
//! Talks to the v3 API of a Glances instance (`glances -w`) to read host
//! CPU, memory, filesystem and network usage.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{bytes_to_mbps, clamp_percent, GlancesSettings, MetricsSource, SystemHealth};

use crate::error::{AppError, AppResult};

/// Glances API client bound to one instance
#[derive(Clone)]
pub struct GlancesClient {
    client: Client,
    settings: GlancesSettings,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct QuickLook {
    #[serde(default)]
    cpu: f64,
    #[serde(default)]
    mem: f64,
}

#[derive(Debug, Deserialize)]
struct FileSystem {
    #[serde(default)]
    percent: f64,
}

#[derive(Debug, Deserialize)]
struct NetworkInterface {
    #[serde(default)]
    interface_name: String,
    /// Bytes received since the previous Glances refresh
    #[serde(default)]
    rx: f64,
    /// Bytes sent since the previous Glances refresh
    #[serde(default)]
    tx: f64,
    #[serde(default)]
    time_since_update: f64,
}

impl NetworkInterface {
    fn is_loopback(&self) -> bool {
        self.interface_name == "lo" || self.interface_name.starts_with("lo0")
    }
}

impl GlancesClient {
    pub fn new(client: Client, settings: GlancesSettings, timeout: Duration) -> Self {
        Self {
            client,
            settings,
            timeout,
        }
    }

    fn request(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/api/3/{}", self.settings.url.trim_end_matches('/'), endpoint);

        let request = self.client.get(url).timeout(self.timeout);
        match &self.settings.username {
            Some(username) => request.basic_auth(username, self.settings.password.as_ref()),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let response = self
            .request(endpoint)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Glances request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "Glances returned HTTP {} for {}",
                status, endpoint
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse Glances {}: {}", endpoint, e))
        })
    }

    /// Check that the instance answers and accepts our credentials
    pub async fn test_connection(&self) -> AppResult<()> {
        let response = self
            .request("status")
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Could not reach Glances: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::ExternalService(format!(
                "Glances returned HTTP {}",
                response.status()
            )))
        }
    }

    /// Read current host metrics
    pub async fn fetch_health(&self) -> AppResult<SystemHealth> {
        let (quicklook, filesystems, interfaces) = tokio::try_join!(
            self.get::<QuickLook>("quicklook"),
            self.get::<Vec<FileSystem>>("fs"),
            self.get::<Vec<NetworkInterface>>("network"),
        )?;

        let storage = filesystems
            .iter()
            .map(|fs| fs.percent)
            .fold(0.0_f64, f64::max);

        let (mut down, mut up) = (0_u32, 0_u32);
        for iface in interfaces.iter().filter(|i| !i.is_loopback()) {
            down = down.saturating_add(bytes_to_mbps(iface.rx, iface.time_since_update));
            up = up.saturating_add(bytes_to_mbps(iface.tx, iface.time_since_update));
        }

        Ok(SystemHealth {
            cpu: clamp_percent(quicklook.cpu),
            memory: clamp_percent(quicklook.mem),
            storage: clamp_percent(storage),
            network_status: "Optimal".to_string(),
            network_down: down,
            network_up: up,
            source: MetricsSource::Glances,
        })
    }
}
