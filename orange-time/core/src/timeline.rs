//! Timeline derivations: category filtering, free-text search and grouping
//! tasks into day or month buckets.

use crate::date::month_key;
use crate::model::{Category, Task, UnknownCategory};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Selector value that matches every category.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Group key for tasks whose date could not be read.
pub const UNSCHEDULED: &str = "Unscheduled";

/// How many categories the timeline filter bar offers besides "All Categories".
const FILTER_BAR_CATEGORIES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category == *category,
        }
    }

    /// The filters offered by the timeline's filter bar, in order.
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(
                Category::ALL
                    .into_iter()
                    .take(FILTER_BAR_CATEGORIES)
                    .map(CategoryFilter::Only),
            )
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category.name()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>().map(CategoryFilter::Only)
        }
    }
}

/// Period the timeline buckets tasks by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GroupMode {
    #[default]
    Day,
    Month,
}

/// One bucket of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGroup<'a> {
    /// Heading: the raw date string in day mode, `"June, 2026"` in month mode.
    pub key: String,
    /// First calendar day the key stands for; `None` for [`UNSCHEDULED`].
    pub anchor: Option<NaiveDate>,
    pub tasks: Vec<&'a Task>,
}

pub fn filter_by_category<'a, I>(tasks: I, filter: CategoryFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|task| filter.matches(task)).collect()
}

/// Case-insensitive substring search over title, description, category and date.
///
/// A blank query matches everything.
pub fn search_tasks<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let needle = query.trim().to_lowercase();
    tasks
        .into_iter()
        .filter(|task| {
            needle.is_empty()
                || [
                    task.title.as_str(),
                    task.description.as_str(),
                    task.category.name(),
                    task.date_str.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

fn group_slot(task: &Task, mode: GroupMode) -> (String, Option<NaiveDate>) {
    match (task.date(), mode) {
        (None, _) => (UNSCHEDULED.to_string(), None),
        (Some(date), GroupMode::Day) => (task.date_str.as_str().to_string(), Some(date)),
        (Some(date), GroupMode::Month) => (month_key(date), date.with_day(1)),
    }
}

/// Buckets tasks by day or month.
///
/// Tasks inside a group are in ascending date order. Groups are ordered by
/// the first day they stand for, with [`UNSCHEDULED`] last.
pub fn group_by_period<'a, I>(tasks: I, mode: GroupMode) -> Vec<TimelineGroup<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut ordered: Vec<&Task> = tasks.into_iter().collect();
    ordered.sort_by_key(|task| task.date_str.sort_key());

    let mut groups: Vec<TimelineGroup<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for task in ordered {
        let (key, anchor) = group_slot(task, mode);
        match index.get(&key) {
            Some(&position) => groups[position].tasks.push(task),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(TimelineGroup {
                    key,
                    anchor,
                    tasks: vec![task],
                });
            }
        }
    }

    groups.sort_by_key(|group| (group.anchor.is_none(), group.anchor));
    groups
}
