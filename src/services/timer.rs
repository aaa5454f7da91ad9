use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::error::TimerError;

/// Work to run once a delayed action comes due.
pub type DelayedAction = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Runs a callback at or after a point in time, at most once per registration.
#[async_trait]
pub trait TimerFacility: Send + Sync {
    async fn schedule_at(&self, fire_at: DateTime<Utc>, action: DelayedAction) -> Result<(), TimerError>;
}

/// [`TimerFacility`] backed by one-shot jobs on a `tokio-cron-scheduler`
/// [`JobScheduler`].
#[derive(Clone)]
pub struct CronTimer {
    scheduler: JobScheduler,
}

impl CronTimer {
    pub async fn new() -> Result<Self, TimerError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| TimerError::Scheduler(e.to_string()))?;
        Ok(Self { scheduler })
    }

    pub async fn start(&self) -> Result<(), TimerError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| TimerError::Scheduler(e.to_string()))?;
        tracing::info!("Timer scheduler started");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), TimerError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| TimerError::Scheduler(e.to_string()))
    }
}

#[async_trait]
impl TimerFacility for CronTimer {
    async fn schedule_at(&self, fire_at: DateTime<Utc>, action: DelayedAction) -> Result<(), TimerError> {
        // The scheduler counts whole seconds and truncates, so round up.
        // Past-due targets run on the next scheduler tick.
        let delay = (fire_at - Utc::now()).to_std().unwrap_or_default();
        let delay = std::time::Duration::from_secs(delay.as_secs() + u64::from(delay.subsec_nanos() > 0));

        // The job closure is FnMut; taking the action out of the slot keeps
        // it to a single run even if the job is ever re-triggered.
        let slot = Arc::new(Mutex::new(Some(action)));
        let job = Job::new_one_shot_async(delay, move |_uuid, _l| {
            let action = slot.lock().ok().and_then(|mut guard| guard.take());
            Box::pin(async move {
                if let Some(action) = action {
                    // Never run before the target, whatever the tick granularity.
                    if let Ok(remaining) = (fire_at - Utc::now()).to_std() {
                        tokio::time::sleep(remaining).await;
                    }
                    action().await;
                }
            })
        })
        .map_err(|e| TimerError::Registration(e.to_string()))?;

        let job_id: Uuid = self
            .scheduler
            .add(job)
            .await
            .map_err(|e| TimerError::Registration(e.to_string()))?;
        tracing::debug!("Registered job {} to fire at {}", job_id, fire_at);
        Ok(())
    }
}
