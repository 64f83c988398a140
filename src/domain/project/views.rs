use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entities::{
  Cost, MajorItem, Objective, Project, ProjectPermissions, ProjectRole, ProjectStatus, Task,
};
use super::progress::{CostSummary, TaskCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
  #[default]
  All,
  /// Anything not completed
  Ongoing,
  Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFilter {
  #[default]
  All,
  Owned,
  /// Projects where the caller is member or supervisor but not owner
  Shared,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
  pub search: Option<String>,
  pub status: StatusFilter,
  pub role: RoleFilter,
}

impl ProjectFilter {
  pub fn matches(&self, project: &Project, is_owner: bool) -> bool {
    let search_ok = match self.search.as_deref().map(str::trim) {
      Some(term) if !term.is_empty() => project
        .name
        .to_lowercase()
        .contains(&term.to_lowercase()),
      _ => true,
    };

    let status_ok = match self.status {
      StatusFilter::All => true,
      StatusFilter::Ongoing => project.status != ProjectStatus::Completed,
      StatusFilter::Completed => project.status == ProjectStatus::Completed,
    };

    let role_ok = match self.role {
      RoleFilter::All => true,
      RoleFilter::Owned => is_owner,
      RoleFilter::Shared => !is_owner,
    };

    search_ok && status_ok && role_ok
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
  pub project: Project,
  pub task_counts: TaskCounts,
  pub progress: u8,
  pub role: Option<ProjectRole>,
}

/// Counts over every project visible to the caller, before filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectStats {
  pub total: usize,
  pub completed: usize,
  pub ongoing: usize,
}

impl ProjectStats {
  pub fn from_projects(projects: &[Project]) -> Self {
    let completed = projects.iter().filter(|p| p.is_completed()).count();
    Self {
      total: projects.len(),
      completed,
      ongoing: projects.len() - completed,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectListing {
  pub projects: Vec<ProjectSummary>,
  pub stats: ProjectStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
  #[serde(flatten)]
  pub task: Task,
  pub is_overdue: bool,
}

impl TaskView {
  pub fn new(task: Task, today: NaiveDate) -> Self {
    let is_overdue = task.is_overdue(today);
    Self { task, is_overdue }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
  pub email: String,
  pub display_name: String,
  pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetails {
  pub project: Project,
  pub objectives: Vec<Objective>,
  pub major_items: Vec<MajorItem>,
  pub tasks: Vec<TaskView>,
  pub costs: Vec<Cost>,
  pub cost_summary: CostSummary,
  pub task_counts: TaskCounts,
  pub progress: u8,
  pub team: Vec<TeamMember>,
  pub permissions: ProjectPermissions,
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  fn project(name: &str, status: ProjectStatus) -> Project {
    let mut p = Project::new(name.into(), None, None, None, Uuid::new_v4());
    p.status = status;
    p
  }

  #[test]
  fn test_filter_search_is_case_insensitive() {
    let p = project("Website Relaunch", ProjectStatus::Ongoing);
    let filter = ProjectFilter {
      search: Some("  relaunch ".into()),
      ..Default::default()
    };
    assert!(filter.matches(&p, true));

    let filter = ProjectFilter {
      search: Some("mobile".into()),
      ..Default::default()
    };
    assert!(!filter.matches(&p, true));
  }

  #[test]
  fn test_filter_status_and_role() {
    let done = project("A", ProjectStatus::Completed);
    let open = project("B", ProjectStatus::Ongoing);

    let ongoing = ProjectFilter {
      status: StatusFilter::Ongoing,
      ..Default::default()
    };
    assert!(ongoing.matches(&open, true));
    assert!(!ongoing.matches(&done, true));

    let shared = ProjectFilter {
      role: RoleFilter::Shared,
      ..Default::default()
    };
    assert!(shared.matches(&open, false));
    assert!(!shared.matches(&open, true));
  }

  #[test]
  fn test_stats() {
    let projects = vec![
      project("A", ProjectStatus::Completed),
      project("B", ProjectStatus::Ongoing),
      project("C", ProjectStatus::Ongoing),
    ];
    assert_eq!(
      ProjectStats::from_projects(&projects),
      ProjectStats {
        total: 3,
        completed: 1,
        ongoing: 2
      }
    );
  }
}
