use super::registry::JobRegistry;
use crate::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Delay before the metrics snapshot that runs once at startup.
pub const STARTUP_METRICS_DELAY: Duration = Duration::from_secs(5);

/// Registers every job of the registry with the cron engine and starts it.
///
/// The returned handle must stay alive for as long as jobs should fire.
pub async fn start(registry: Arc<JobRegistry>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    for def in registry.definitions() {
        def.parsed_schedule()
            .map_err(|e| Error::Config(format!("invalid schedule for {}: {}", def.name, e)))?;

        let registry = registry.clone();
        let job = Job::new_async(def.cron_expression().as_str(), move |_id, _scheduler| {
            let registry = registry.clone();
            Box::pin(async move {
                if let Err(e) = registry.run(def).await {
                    tracing::error!(job = def.name, error = %e, "scheduled job failed");
                }
            })
        })?;
        let engine_id: Uuid = scheduler.add(job).await?;
        tracing::info!(
            job = def.name,
            %engine_id,
            schedule = def.schedule,
            timezone = def.timezone_name(),
            "job scheduled"
        );
    }

    scheduler.start().await?;
    tracing::info!(jobs = registry.definitions().len(), "job scheduler started");
    Ok(scheduler)
}

/// Runs `collect-metrics` once, shortly after startup.
pub fn spawn_startup_metrics(registry: Arc<JobRegistry>, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = registry.trigger("collect-metrics").await {
            tracing::error!(error = %e, "startup metrics collection failed");
        }
    });
}
