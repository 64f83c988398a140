//! Application layer
//!
//! Use cases translate client input into domain values and delegate to the
//! domain services for projects, teams, notifications and the assistant.

pub mod assistant;
pub mod auth;
pub mod notification;
pub mod project;
pub mod team;
