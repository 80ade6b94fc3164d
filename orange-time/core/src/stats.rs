//! Dashboard aggregates.

use crate::model::{Category, Status, Task};
use serde::Serialize;

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub done: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub total: usize,
}

/// One bar of the category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub name: &'static str,
    /// Bar fill style of the category.
    pub color: &'static str,
    pub count: usize,
    pub percent: f64,
}

/// Everything the dashboard shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub counts: StatusCounts,
    pub completion: u8,
    /// Tasks that are not done; the grey slice of the completion chart.
    pub remaining: usize,
    pub distribution: Vec<CategoryShare>,
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: tasks.len(),
        ..StatusCounts::default()
    };
    for task in tasks {
        match task.status {
            Status::Done => counts.done += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::ToDo => counts.todo += 1,
        }
    }
    counts
}

/// Share of done tasks as a whole percentage; 0 for an empty collection.
pub fn completion_percentage(counts: &StatusCounts) -> u8 {
    if counts.total == 0 {
        return 0;
    }
    let percent = (counts.done as f64 / counts.total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Task count and share for each of `categories`, largest first.
///
/// Categories with equal counts keep the order they were given in.
pub fn category_distribution(tasks: &[Task], categories: &[Category]) -> Vec<CategoryShare> {
    let total = tasks.len();
    let mut shares: Vec<CategoryShare> = categories
        .iter()
        .map(|&category| {
            let count = tasks.iter().filter(|task| task.category == category).count();
            let percent = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            CategoryShare {
                category,
                name: category.name(),
                color: category.descriptor().color,
                count,
                percent,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

impl DashboardSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let counts = status_counts(tasks);
        Self {
            completion: completion_percentage(&counts),
            remaining: counts.total - counts.done,
            distribution: category_distribution(tasks, &Category::ALL),
            counts,
        }
    }
}
