//! Readspace Library Management System
//!
//! A Rust REST API server for library management: accounts, book catalog
//! and borrow requests, physical seat reservations with a durable
//! reminder/auto-release scheduler, announcements, a community Q&A hub
//! and support tickets.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduler;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
