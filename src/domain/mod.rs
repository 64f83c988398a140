pub mod assistant;
pub mod auth;
pub mod notification;
pub mod project;

#[cfg(test)]
pub mod testutil;
