//! Service reachability checks, on demand and on a schedule

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use shared::{ServiceStatus, StatusCheckResult};

use crate::error::AppResult;
use crate::external::HttpProber;
use crate::services::CatalogService;

/// Store every probe outcome. A failed write is logged and does not stop
/// the remaining ones.
async fn record_outcomes<F, Fut>(
    outcomes: Vec<(i32, ServiceStatus)>,
    mut record: F,
) -> Vec<StatusCheckResult>
where
    F: FnMut(i32, ServiceStatus) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut results = Vec::with_capacity(outcomes.len());
    for (id, status) in outcomes {
        if let Err(e) = record(id, status).await {
            tracing::warn!("Could not store status of service {}: {}", id, e);
        }
        results.push(StatusCheckResult {
            id: Some(id),
            status,
        });
    }
    results
}

/// Probes services and records their status
#[derive(Clone)]
pub struct StatusCheckService {
    catalog: CatalogService,
    prober: HttpProber,
}

impl StatusCheckService {
    pub fn new(catalog: CatalogService, prober: HttpProber) -> Self {
        Self { catalog, prober }
    }

    /// Probe one service and persist the result
    pub async fn check_service(&self, id: i32) -> AppResult<ServiceStatus> {
        let service = self.catalog.get(id).await?;
        let status = self.prober.check(&service.url).await;
        self.catalog.record_status(id, status).await?;
        Ok(status)
    }

    /// Probe every service concurrently and persist the results
    pub async fn check_all(&self) -> AppResult<Vec<StatusCheckResult>> {
        let targets = self.catalog.probe_targets().await?;

        let probes = targets.iter().map(|target| async move {
            (target.id, self.prober.check(&target.url).await)
        });
        let outcomes = join_all(probes).await;

        Ok(record_outcomes(outcomes, |id, status| self.catalog.record_status(id, status)).await)
    }

    /// Spawn a task that re-checks all services every `interval`
    pub fn spawn_periodic(self, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match self.check_all().await {
                    Ok(results) => {
                        let online = results
                            .iter()
                            .filter(|r| r.status == ServiceStatus::Online)
                            .count();
                        tracing::info!(
                            "Status check complete: {}/{} services online",
                            online,
                            results.len()
                        );
                    }
                    Err(e) => tracing::warn!("Periodic status check failed: {}", e),
                }
            }
        })
    }
}
