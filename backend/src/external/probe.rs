//! Reachability probing of service URLs

use std::time::Duration;

use reqwest::Client;
use shared::{ProbeOutcome, ServiceStatus};

/// Sends a HEAD request to a service and reports whether anything answered
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Probe a URL. Never fails: transport errors are an `Unreachable` outcome.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(response) => ProbeOutcome::Responded(response.status().as_u16()),
            Err(e) => {
                tracing::debug!("Probe of {} failed: {}", url, e);
                ProbeOutcome::Unreachable
            }
        }
    }

    /// Probe a URL and classify the result
    pub async fn check(&self, url: &str) -> ServiceStatus {
        let status = ServiceStatus::from_probe(self.probe(url).await);
        tracing::debug!("Service at {} is {}", url, status);
        status
    }
}
