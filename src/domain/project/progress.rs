use rust_decimal::Decimal;
use serde::Serialize;

use super::entities::{Cost, CostKind, ProjectStatus, Task};

/// Task totals for one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskCounts {
  pub total: u32,
  pub done: u32,
}

impl TaskCounts {
  pub fn from_tasks(tasks: &[Task]) -> Self {
    Self {
      total: tasks.len() as u32,
      done: tasks.iter().filter(|t| t.is_done()).count() as u32,
    }
  }

  /// Percentage of done tasks, rounded; 0 without tasks
  pub fn progress(&self) -> u8 {
    if self.total == 0 {
      return 0;
    }
    (f64::from(self.done) * 100.0 / f64::from(self.total)).round() as u8
  }

  pub fn all_done(&self) -> bool {
    self.done == self.total
  }

  /// Completed iff there is at least one task and every task is done
  pub fn derived_status(&self) -> ProjectStatus {
    if self.total > 0 && self.all_done() {
      ProjectStatus::Completed
    } else {
      ProjectStatus::Ongoing
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CostSummary {
  pub income: Decimal,
  pub expense: Decimal,
  pub balance: Decimal,
}

impl CostSummary {
  pub fn from_costs(costs: &[Cost]) -> Self {
    let (income, expense) =
      costs
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), cost| match cost.kind {
          CostKind::Income => (inc + cost.amount, exp),
          CostKind::Expense => (inc, exp + cost.amount),
        });

    Self {
      income,
      expense,
      balance: income - expense,
    }
  }
}
