//! Support tickets service

use crate::{
    error::AppResult,
    models::ticket::{CreateTicket, Ticket, UpdateTicket},
    repository::Repository,
};

#[derive(Clone)]
pub struct TicketsService {
    repository: Repository,
}

impl TicketsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn open(&self, ticket: CreateTicket, opened_by: i32) -> AppResult<Ticket> {
        self.repository.tickets.create(&ticket, opened_by).await
    }

    /// Students list their own tickets, staff list all
    pub async fn list(&self, opened_by: Option<i32>) -> AppResult<Vec<Ticket>> {
        self.repository.tickets.list(opened_by).await
    }

    pub async fn update(&self, id: i32, ticket: UpdateTicket) -> AppResult<Ticket> {
        self.repository.tickets.get_by_id(id).await?;
        self.repository.tickets.update(id, &ticket).await
    }
}
