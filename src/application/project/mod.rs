//! Project, sub-item and task use cases

mod create_cost;
mod create_major_item;
mod create_objective;
mod create_project;
mod create_task;
mod delete_project;
mod delete_project_item;
mod finish_project;
mod get_project_details;
mod list_projects;
mod list_tasks;
mod toggle_task_status;
mod update_project;
mod update_task;

pub use create_cost::{CreateCostCommand, CreateCostUseCase};
pub use create_major_item::{CreateMajorItemCommand, CreateMajorItemUseCase};
pub use create_objective::{CreateObjectiveCommand, CreateObjectiveUseCase};
pub use create_project::{CreateProjectCommand, CreateProjectUseCase};
pub use create_task::{CreateTaskCommand, CreateTaskUseCase, TaskFields};
pub use delete_project::{DeleteProjectCommand, DeleteProjectUseCase};
pub use delete_project_item::{DeleteProjectItemCommand, DeleteProjectItemUseCase, ProjectItem};
pub use finish_project::{FinishProjectCommand, FinishProjectUseCase};
pub use get_project_details::{GetProjectDetailsCommand, GetProjectDetailsUseCase};
pub use list_projects::{ListProjectsCommand, ListProjectsUseCase};
pub use list_tasks::{ListTasksCommand, ListTasksResponse, ListTasksUseCase, TaskGroupView};
pub use toggle_task_status::{
  ToggleTaskStatusCommand, ToggleTaskStatusResponse, ToggleTaskStatusUseCase,
};
pub use update_project::{UpdateProjectCommand, UpdateProjectUseCase};
pub use update_task::{UpdateTaskCommand, UpdateTaskUseCase};
