//! Announcements service

use crate::{
    error::AppResult,
    models::announcement::{Announcement, CreateAnnouncement},
    repository::Repository,
};

#[derive(Clone)]
pub struct AnnouncementsService {
    repository: Repository,
}

impl AnnouncementsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Announcement>> {
        self.repository.announcements.list().await
    }

    pub async fn create(
        &self,
        announcement: CreateAnnouncement,
        posted_by: i32,
    ) -> AppResult<Announcement> {
        self.repository.announcements.create(&announcement, posted_by).await
    }

    pub async fn update(
        &self,
        id: i32,
        announcement: CreateAnnouncement,
    ) -> AppResult<Announcement> {
        self.repository.announcements.update(id, &announcement).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.announcements.delete(id).await
    }
}
