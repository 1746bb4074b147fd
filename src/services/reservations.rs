//! Seat reservation engine.
//!
//! Owns the occupancy state of independent-study seats and the
//! notification trail. Every operation is one database transaction; the
//! row locks taken inside it are the only synchronization primitive. The
//! two writers that can race on the same (seat, notification) pair are a
//! student's `respond` and the scheduler-fired auto-release job; both are
//! safe because the pending-guard check-then-act and the cancellation of
//! the opposing job happen inside the same transaction as the state flip.
//!
//! Lock order is always seat before notification.

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::{
    config::ReservationConfig,
    error::{AppError, AppResult, ErrorCode},
    models::{
        enums::{ActionResponse, NotificationType, SeatKind},
        notification::{NewNotification, StudentResponse},
        seat::Seat,
    },
    repository::Repository,
    scheduler::{JobName, JobPayload, Scheduler},
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    scheduler: Arc<dyn Scheduler>,
    config: ReservationConfig,
}

impl ReservationsService {
    pub fn new(
        repository: Repository,
        scheduler: Arc<dyn Scheduler>,
        config: ReservationConfig,
    ) -> Self {
        Self { repository, scheduler, config }
    }

    /// Reserve an independent seat for a student.
    ///
    /// Occupies the seat and schedules the reminder job. No notification
    /// row is written here; the first trail entry appears when the
    /// scheduled reminder fires.
    pub async fn reserve(&self, seat_id: i32, student_id: i32) -> AppResult<Seat> {
        let mut tx = self.repository.pool.begin().await?;

        let seat = self
            .repository
            .seats
            .get_for_update(&mut tx, seat_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchSeat, format!("Seat with id {} not found", seat_id)))?;

        if seat.kind() != SeatKind::Independent {
            return Err(AppError::Validation(
                "Only independent seats can be reserved".to_string(),
            ));
        }
        if !seat.is_available {
            return Err(AppError::Conflict(
                ErrorCode::SeatUnavailable,
                "Seat is not available".to_string(),
            ));
        }

        let now = Utc::now();
        self.repository
            .seats
            .occupy(&mut tx, seat_id, student_id, now)
            .await?;

        self.scheduler
            .schedule(
                &mut tx,
                JobName::SendReservationNotification,
                JobPayload::reservation(seat_id, student_id),
                now + Duration::seconds(self.config.hold_seconds),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(seat_id, student_id, "Seat reserved");
        self.repository.seats.get_by_id(seat_id).await
    }

    /// Job handler: `send reservation notification`.
    ///
    /// Runs after the hold interval. Re-validates that the reservation is
    /// still the one the job was scheduled for; if the seat was released
    /// or re-reserved in the meantime the job is a silent no-op.
    pub async fn handle_send_reservation_notification(
        &self,
        seat_id: i32,
        student_id: i32,
    ) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;

        let seat = match self.repository.seats.get_for_update(&mut tx, seat_id).await? {
            Some(seat) => seat,
            None => return Ok(()),
        };
        if seat.is_available || seat.reserved_by != Some(student_id) {
            // Reservation changed out from under the scheduled job.
            return Ok(());
        }

        // Mid-episode, the previous trail row is the extension this
        // reminder follows; otherwise the episode starts fresh.
        let latest = self
            .repository
            .notifications
            .latest_for_seat(&mut tx, seat_id, student_id)
            .await?;
        let (extension_count, previous) = match latest {
            Some(ref n) if n.notification_type() == NotificationType::Extension => {
                (n.extension_count, Some(n.id))
            }
            _ => (0, None),
        };

        let now = Utc::now();
        let deadline = now + Duration::seconds(self.config.response_window_seconds);

        let notification = self
            .repository
            .notifications
            .insert(
                &mut tx,
                &NewNotification {
                    student_id,
                    seat_id,
                    message: format!(
                        "Your reservation of seat {} needs a response: extend it or release it before the deadline.",
                        seat.seat_number
                    ),
                    requires_action: true,
                    action_response: Some(ActionResponse::Pending),
                    deadline: Some(deadline),
                    notification_type: NotificationType::Reminder,
                    previous_notification_id: previous,
                    extension_count,
                },
            )
            .await?;

        self.scheduler
            .schedule(
                &mut tx,
                JobName::AutoReleaseSeat,
                JobPayload::auto_release(seat_id, student_id, notification.id),
                deadline,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(seat_id, student_id, notification_id = notification.id, "Reminder sent");
        Ok(())
    }

    /// Student response to an actionable notification.
    ///
    /// A notification that does not exist and one owned by another
    /// student produce the same error, so the endpoint does not confirm
    /// resource existence to non-owners.
    pub async fn respond(
        &self,
        notification_id: i32,
        student_id: i32,
        response: StudentResponse,
    ) -> AppResult<String> {
        let mut tx = self.repository.pool.begin().await?;

        // Unlocked peek to learn the seat id, then lock seat before
        // notification like the job handlers do.
        let peek = self
            .repository
            .notifications
            .latest_by_id(&mut tx, notification_id)
            .await?
            .filter(|n| n.student_id == student_id)
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchNotification, "Notification not found".to_string()))?;

        let seat = self
            .repository
            .seats
            .get_for_update(&mut tx, peek.seat_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchSeat, "Seat no longer exists".to_string()))?;

        let notification = self
            .repository
            .notifications
            .get_for_update(&mut tx, notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchNotification, "Notification not found".to_string()))?;

        if !notification.is_pending() {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyActedUpon,
                "Notification has already been acted upon".to_string(),
            ));
        }

        self.repository
            .notifications
            .resolve(&mut tx, notification.id, response.as_action())
            .await?;

        // A stale auto-release must not fire after the student has acted.
        self.scheduler
            .cancel_for_notification(&mut tx, notification.id)
            .await?;

        let now = Utc::now();
        let message = match response {
            StudentResponse::Extend => {
                let extension = self
                    .repository
                    .notifications
                    .insert(
                        &mut tx,
                        &NewNotification {
                            student_id,
                            seat_id: seat.id,
                            message: format!(
                                "Your reservation of seat {} has been extended.",
                                seat.seat_number
                            ),
                            requires_action: false,
                            action_response: None,
                            deadline: None,
                            notification_type: NotificationType::Extension,
                            previous_notification_id: Some(notification.id),
                            extension_count: notification.extension_count + 1,
                        },
                    )
                    .await?;

                // The episode loops back through a full reminder cycle,
                // not a pushed-out deadline.
                self.scheduler
                    .schedule(
                        &mut tx,
                        JobName::SendReservationNotification,
                        JobPayload::reservation(seat.id, student_id),
                        now + Duration::seconds(self.config.extension_hold_seconds),
                    )
                    .await?;

                tracing::info!(
                    seat_id = seat.id,
                    student_id,
                    extension_id = extension.id,
                    "Reservation extended"
                );
                format!("Reservation of seat {} extended", seat.seat_number)
            }
            StudentResponse::Release => {
                self.repository.seats.release(&mut tx, seat.id, now).await?;
                self.repository
                    .notifications
                    .insert(
                        &mut tx,
                        &NewNotification {
                            student_id,
                            seat_id: seat.id,
                            message: format!("You released seat {}.", seat.seat_number),
                            requires_action: false,
                            action_response: None,
                            deadline: None,
                            notification_type: NotificationType::Release,
                            previous_notification_id: Some(notification.id),
                            extension_count: notification.extension_count,
                        },
                    )
                    .await?;

                tracing::info!(seat_id = seat.id, student_id, "Seat released by student");
                format!("Seat {} released", seat.seat_number)
            }
        };

        tx.commit().await?;
        Ok(message)
    }

    /// Job handler: `auto release seat`.
    ///
    /// The timeout path. Redelivery and races with `respond` are absorbed
    /// by the pending guard: once the notification is no longer pending
    /// the job does nothing.
    pub async fn handle_auto_release_seat(
        &self,
        seat_id: i32,
        student_id: i32,
        notification_id: i32,
    ) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;

        let seat = match self.repository.seats.get_for_update(&mut tx, seat_id).await? {
            Some(seat) => seat,
            None => return Ok(()),
        };
        if seat.is_available {
            return Ok(());
        }

        let notification = match self
            .repository
            .notifications
            .get_for_update(&mut tx, notification_id)
            .await?
        {
            Some(notification) => notification,
            None => return Ok(()),
        };
        if !notification.is_pending() {
            // Student already responded, or another delivery got here first.
            return Ok(());
        }

        let now = Utc::now();
        self.repository.seats.release(&mut tx, seat_id, now).await?;
        self.repository
            .notifications
            .resolve(&mut tx, notification.id, ActionResponse::AutoRelease)
            .await?;
        self.repository
            .notifications
            .insert(
                &mut tx,
                &NewNotification {
                    student_id,
                    seat_id,
                    message: format!(
                        "Seat {} was automatically released because the reminder deadline passed.",
                        seat.seat_number
                    ),
                    requires_action: false,
                    action_response: None,
                    deadline: None,
                    notification_type: NotificationType::Release,
                    previous_notification_id: Some(notification.id),
                    extension_count: notification.extension_count,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(seat_id, student_id, notification_id, "Seat auto-released");
        Ok(())
    }

    /// Staff override: force-release a seat, bypassing the student
    /// response path. Cancels the seat's pending jobs and expires any
    /// open decision window so the state machine cannot be driven on a
    /// freed seat.
    pub async fn release_by_staff(&self, seat_id: i32) -> AppResult<Seat> {
        let mut tx = self.repository.pool.begin().await?;

        let seat = self
            .repository
            .seats
            .get_for_update(&mut tx, seat_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchSeat, format!("Seat with id {} not found", seat_id)))?;

        if seat.is_available {
            return Err(AppError::Conflict(
                ErrorCode::SeatUnavailable,
                "Seat is not currently reserved".to_string(),
            ));
        }

        self.repository
            .seats
            .release(&mut tx, seat_id, Utc::now())
            .await?;
        self.repository
            .notifications
            .expire_pending_for_seat(&mut tx, seat_id)
            .await?;
        self.scheduler.cancel_for_seat(&mut tx, seat_id).await?;

        tx.commit().await?;

        tracing::info!(seat_id, "Seat force-released by staff");
        self.repository.seats.get_by_id(seat_id).await
    }
}
