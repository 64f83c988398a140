use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::{MajorItem, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
  #[default]
  DeadlineAsc,
  DeadlineDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskGrouping {
  #[default]
  None,
  MajorItem,
  Week,
  Month,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
  pub major_item_id: Option<Uuid>,
  pub sort: TaskSort,
  pub group_by: TaskGrouping,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskGroup {
  pub key: String,
  pub label: String,
  pub tasks: Vec<Task>,
}

const UNASSIGNED_KEY: &str = "unassigned";

/// Filters, sorts and groups a project's tasks.
///
/// Tasks are ordered by deadline with ties broken by creation time
/// (always ascending). Major item groups follow `major_items` order with
/// tasks of unknown items last; week and month groups are chronological.
/// Empty groups are omitted.
pub fn arrange(mut tasks: Vec<Task>, major_items: &[MajorItem], query: &TaskQuery) -> Vec<TaskGroup> {
  if let Some(major_item_id) = query.major_item_id {
    tasks.retain(|t| t.major_item_id == major_item_id);
  }

  tasks.sort_by(|a, b| {
    let by_deadline = match query.sort {
      TaskSort::DeadlineAsc => a.deadline.cmp(&b.deadline),
      TaskSort::DeadlineDesc => b.deadline.cmp(&a.deadline),
    };
    by_deadline.then_with(|| a.created_at.cmp(&b.created_at))
  });

  match query.group_by {
    TaskGrouping::None => {
      if tasks.is_empty() {
        Vec::new()
      } else {
        vec![TaskGroup {
          key: "all".to_string(),
          label: "All tasks".to_string(),
          tasks,
        }]
      }
    }
    TaskGrouping::MajorItem => group_by_major_item(tasks, major_items),
    TaskGrouping::Week => group_chronologically(tasks, |t| {
      let week = t.deadline.iso_week();
      format!("{}-W{:02}", week.year(), week.week())
    }),
    TaskGrouping::Month => group_chronologically(tasks, |t| t.deadline.format("%Y-%m").to_string()),
  }
}

fn group_by_major_item(tasks: Vec<Task>, major_items: &[MajorItem]) -> Vec<TaskGroup> {
  let mut groups: Vec<TaskGroup> = major_items
    .iter()
    .map(|item| TaskGroup {
      key: item.id.to_string(),
      label: item.name.clone(),
      tasks: Vec::new(),
    })
    .collect();
  let mut unassigned = Vec::new();

  for task in tasks {
    match major_items.iter().position(|m| m.id == task.major_item_id) {
      Some(index) => groups[index].tasks.push(task),
      None => unassigned.push(task),
    }
  }

  groups.push(TaskGroup {
    key: UNASSIGNED_KEY.to_string(),
    label: "Unassigned".to_string(),
    tasks: unassigned,
  });
  groups.retain(|g| !g.tasks.is_empty());
  groups
}

/// Keys must sort lexicographically in time order
fn group_chronologically(tasks: Vec<Task>, key_of: impl Fn(&Task) -> String) -> Vec<TaskGroup> {
  let mut groups: Vec<TaskGroup> = Vec::new();

  for task in tasks {
    let key = key_of(&task);
    match groups.iter_mut().find(|g| g.key == key) {
      Some(group) => group.tasks.push(task),
      None => groups.push(TaskGroup {
        label: key.clone(),
        key,
        tasks: vec![task],
      }),
    }
  }

  groups.sort_by(|a, b| a.key.cmp(&b.key));
  groups
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::project::entities::TaskDetails;
  use chrono::{Duration, NaiveDate, Utc};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn task(major_item_id: Uuid, title: &str, deadline: NaiveDate, age_minutes: i64) -> Task {
    let mut task = Task::new(
      Uuid::nil(),
      TaskDetails {
        major_item_id,
        minor_item: title.to_string(),
        deadline,
        main_resp: None,
        sub_resp: None,
        objective_ids: vec![],
      },
    );
    task.created_at = Utc::now() - Duration::minutes(age_minutes);
    task
  }

  fn titles(group: &TaskGroup) -> Vec<&str> {
    group.tasks.iter().map(|t| t.minor_item.as_str()).collect()
  }

  #[test]
  fn test_sorts_by_deadline_then_creation() {
    let item = Uuid::new_v4();
    let tasks = vec![
      task(item, "late", date(2025, 5, 20), 10),
      task(item, "newer", date(2025, 5, 1), 1),
      task(item, "older", date(2025, 5, 1), 5),
    ];

    let groups = arrange(tasks.clone(), &[], &TaskQuery::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(titles(&groups[0]), vec!["older", "newer", "late"]);

    let query = TaskQuery {
      sort: TaskSort::DeadlineDesc,
      ..Default::default()
    };
    let groups = arrange(tasks, &[], &query);
    assert_eq!(titles(&groups[0]), vec!["late", "older", "newer"]);
  }

  #[test]
  fn test_filters_by_major_item() {
    let design = Uuid::new_v4();
    let build = Uuid::new_v4();
    let tasks = vec![
      task(design, "sketch", date(2025, 5, 1), 1),
      task(build, "code", date(2025, 5, 2), 1),
    ];

    let query = TaskQuery {
      major_item_id: Some(build),
      ..Default::default()
    };
    let groups = arrange(tasks, &[], &query);
    assert_eq!(titles(&groups[0]), vec!["code"]);
  }

  #[test]
  fn test_groups_by_major_item_in_item_order() {
    let design = MajorItem::new(Uuid::nil(), "Design".into());
    let build = MajorItem::new(Uuid::nil(), "Build".into());
    let empty = MajorItem::new(Uuid::nil(), "Empty".into());
    let tasks = vec![
      task(Uuid::new_v4(), "orphan", date(2025, 5, 1), 1),
      task(build.id, "code", date(2025, 5, 2), 1),
      task(design.id, "sketch", date(2025, 5, 3), 1),
    ];

    let query = TaskQuery {
      group_by: TaskGrouping::MajorItem,
      ..Default::default()
    };
    let groups = arrange(tasks, &[design.clone(), build.clone(), empty], &query);

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Design", "Build", "Unassigned"]);
    assert_eq!(groups[0].key, design.id.to_string());
    assert_eq!(titles(&groups[2]), vec!["orphan"]);
  }

  #[test]
  fn test_groups_by_iso_week() {
    let item = Uuid::new_v4();
    let tasks = vec![
      // 2025-01-01 falls in ISO week 1 of 2025
      task(item, "new year", date(2025, 1, 1), 1),
      // 2024-12-29 is a Sunday in ISO week 52 of 2024
      task(item, "holiday", date(2024, 12, 29), 1),
      task(item, "spring", date(2025, 3, 3), 1),
    ];

    let query = TaskQuery {
      sort: TaskSort::DeadlineDesc,
      group_by: TaskGrouping::Week,
      ..Default::default()
    };
    let groups = arrange(tasks, &[], &query);

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["2024-W52", "2025-W01", "2025-W10"]);
  }

  #[test]
  fn test_groups_by_month() {
    let item = Uuid::new_v4();
    let tasks = vec![
      task(item, "b", date(2025, 11, 3), 1),
      task(item, "a", date(2025, 2, 14), 1),
      task(item, "c", date(2025, 2, 1), 1),
    ];

    let query = TaskQuery {
      group_by: TaskGrouping::Month,
      ..Default::default()
    };
    let groups = arrange(tasks, &[], &query);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "2025-02");
    assert_eq!(titles(&groups[0]), vec!["c", "a"]);
    assert_eq!(groups[1].key, "2025-11");
  }

  #[test]
  fn test_no_tasks_no_groups() {
    assert!(arrange(vec![], &[], &TaskQuery::default()).is_empty());
  }
}
