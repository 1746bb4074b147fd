//! Domain models

pub mod announcement;
pub mod book;
pub mod enums;
pub mod job;
pub mod notification;
pub mod question;
pub mod seat;
pub mod ticket;
pub mod user;
