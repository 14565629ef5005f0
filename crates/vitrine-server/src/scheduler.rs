//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring image-cache maintenance job.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::AppState;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(state: AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_image_maintenance_job(&scheduler, state).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the hourly image-cache maintenance job.
///
/// Runs at minute 17 of every hour (`0 17 * * * *`): sweeps expired cache
/// entries, then prefetches thumbnails for the featured products so the
/// home page serves data URLs on first paint.
async fn register_image_maintenance_job(
    scheduler: &JobScheduler,
    state: AppState,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 17 * * * *", move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting image cache maintenance");
            run_image_maintenance(&state).await;
            tracing::info!("scheduler: image cache maintenance complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Sweep expired entries and warm the cache for the featured products.
async fn run_image_maintenance(state: &AppState) {
    match state.images.prune_expired() {
        Ok(0) => {}
        Ok(removed) => tracing::info!(removed, "scheduler: pruned expired image entries"),
        Err(e) => tracing::error!(error = %e, "scheduler: image cache prune failed"),
    }

    let featured: Vec<vitrine_core::Product> = match state.catalog.fetch_products().await {
        Ok(products) => products.into_iter().filter(|p| p.is_featured).collect(),
        Err(e) => {
            // A failed load just skips this round; the next tick retries.
            tracing::error!(error = %e, "scheduler: catalog load failed; skipping prefetch");
            return;
        }
    };

    if featured.is_empty() {
        tracing::info!("scheduler: no featured products; skipping prefetch");
        return;
    }

    let stats = state
        .images
        .ensure_for_page(
            state.catalog.http(),
            &featured,
            state.config.image_fetch_concurrency,
        )
        .await;
    tracing::info!(
        fetched = stats.fetched,
        failed = stats.failed,
        skipped = stats.skipped,
        "scheduler: featured image prefetch"
    );
}
