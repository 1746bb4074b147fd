//! Background worker dispatching due jobs to the reservation engine

use std::time::Duration;

use crate::{
    config::SchedulerConfig,
    error::{AppError, AppResult},
    models::job::ScheduledJob,
    services::reservations::ReservationsService,
};

use super::{JobName, PgJobQueue};

const CLAIM_BATCH: i64 = 16;

/// Polls the job queue and runs the engine's job handlers.
///
/// Jobs run independently of any HTTP request; redelivery is possible
/// (stale-claim requeue), so the handlers themselves are the idempotency
/// guard, not this loop.
pub struct SchedulerWorker {
    queue: PgJobQueue,
    reservations: ReservationsService,
    config: SchedulerConfig,
}

impl SchedulerWorker {
    pub fn new(queue: PgJobQueue, reservations: ReservationsService, config: SchedulerConfig) -> Self {
        Self { queue, reservations, config }
    }

    /// Spawn the polling loop on the runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.poll_seconds));
        tracing::info!(
            poll_seconds = self.config.poll_seconds,
            "Scheduler worker started"
        );

        loop {
            ticker.tick().await;

            match self.queue.requeue_stale(self.config.stale_seconds).await {
                Ok(0) => {}
                Ok(n) => tracing::warn!("Re-queued {} stale job claims", n),
                Err(e) => tracing::error!("Failed to requeue stale jobs: {}", e),
            }

            let jobs = match self.queue.claim_due(CLAIM_BATCH).await {
                Ok(jobs) => jobs,
                Err(e) => {
                    tracing::error!("Failed to claim due jobs: {}", e);
                    continue;
                }
            };

            for job in jobs {
                let job_id = job.id;
                let name = job.name.clone();
                match self.dispatch(job).await {
                    Ok(()) => {
                        if let Err(e) = self.queue.mark_done(job_id).await {
                            tracing::error!(job_id, "Failed to remove finished job: {}", e);
                        }
                    }
                    Err(e) => {
                        // No retry: the failure is recorded and logged.
                        tracing::error!(job_id, name = %name, "Scheduled job failed: {}", e);
                        if let Err(e) = self.queue.mark_failed(job_id, &e.to_string()).await {
                            tracing::error!(job_id, "Failed to mark job failed: {}", e);
                        }
                    }
                }
            }
        }
    }

    async fn dispatch(&self, job: ScheduledJob) -> AppResult<()> {
        let name: JobName = job
            .name
            .parse()
            .map_err(|e: String| AppError::Internal(e))?;
        let payload = job.payload.0;

        tracing::debug!(job_id = job.id, name = name.as_str(), ?payload, "Dispatching job");

        match name {
            JobName::SendReservationNotification => {
                self.reservations
                    .handle_send_reservation_notification(payload.seat_id, payload.student_id)
                    .await
            }
            JobName::AutoReleaseSeat => {
                let notification_id = payload.notification_id.ok_or_else(|| {
                    AppError::Internal("auto release seat job missing notification_id".to_string())
                })?;
                self.reservations
                    .handle_auto_release_seat(payload.seat_id, payload.student_id, notification_id)
                    .await
            }
        }
    }
}
