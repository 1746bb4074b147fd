//! Business logic services

pub mod announcements;
pub mod catalog;
pub mod notifications;
pub mod questions;
pub mod reservations;
pub mod seats;
pub mod tickets;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, ReservationConfig},
    repository::Repository,
    scheduler::Scheduler,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub users: users::UsersService,
    pub seats: seats::SeatsService,
    pub reservations: reservations::ReservationsService,
    pub notifications: notifications::NotificationsService,
    pub catalog: catalog::CatalogService,
    pub announcements: announcements::AnnouncementsService,
    pub questions: questions::QuestionsService,
    pub tickets: tickets::TicketsService,
}

impl Services {
    /// Create all services with the given repository and scheduler
    pub fn new(
        repository: Repository,
        scheduler: Arc<dyn Scheduler>,
        auth_config: AuthConfig,
        reservation_config: ReservationConfig,
    ) -> Self {
        Self {
            repository: repository.clone(),
            users: users::UsersService::new(repository.clone(), auth_config),
            seats: seats::SeatsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(
                repository.clone(),
                scheduler,
                reservation_config,
            ),
            notifications: notifications::NotificationsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            announcements: announcements::AnnouncementsService::new(repository.clone()),
            questions: questions::QuestionsService::new(repository.clone()),
            tickets: tickets::TicketsService::new(repository),
        }
    }
}
