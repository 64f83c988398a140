mod access;
pub mod board;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod progress;
pub mod services;
pub mod team;
pub mod value_objects;
pub mod views;

pub use board::{TaskGroup, TaskGrouping, TaskQuery, TaskSort};
pub use entities::{
  Actor, Cost, CostKind, JoinDecision, JoinRequest, MajorItem, Objective, Project,
  ProjectAggregate, ProjectPermissions, ProjectRole, ProjectStatus, Roster, Task, TaskDetails,
  TaskStatus,
};
pub use errors::{ProjectError, ValidationError};
pub use ports::{
  CostRepository, JoinRequestRepository, MajorItemRepository, ObjectiveRepository, ProjectCache,
  ProjectRepository, TaskRepository,
};
pub use progress::{CostSummary, TaskCounts};
pub use services::{
  ProjectData, ProjectService, ProjectServiceDependencies, ProjectUpdateData, TaskData,
};
pub use team::{TeamService, TeamServiceDependencies};
pub use views::{
  ProjectDetails, ProjectFilter, ProjectListing, ProjectStats, ProjectSummary, RoleFilter,
  StatusFilter, TaskView, TeamMember,
};
