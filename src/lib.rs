//! One Page Project Manager backend
//!
//! Projects with objectives, major items, tasks and costs, team invitations,
//! join requests, in-app notifications and a project-management chat
//! assistant, served as a JSON API.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
