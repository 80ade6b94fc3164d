use crate::date::{TaskDate, deserialize_optional_date};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of buckets a task can be filed under.
///
/// Stored by name. A stored name outside the set reads back as
/// [`Category::Personal`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
    #[default]
    Personal,
    Learning,
    Health,
    Urgent,
    Design,
    Product,
}

/// Style facets for one category. Static configuration, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDescriptor {
    pub category: Category,
    pub name: &'static str,
    pub color: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub bg: &'static str,
    /// Material icon shown next to timeline entries.
    pub icon: &'static str,
}

/// Configured categories, in display order.
pub const CATEGORIES: [CategoryDescriptor; 6] = [
    CategoryDescriptor {
        category: Category::Personal,
        name: "Personal",
        color: "bg-[#f37021]",
        border: "border-[#f37021]/30",
        text: "text-[#f37021]",
        bg: "bg-[#f37021]/10",
        icon: "image",
    },
    CategoryDescriptor {
        category: Category::Learning,
        name: "Learning",
        color: "bg-blue-500",
        border: "border-blue-200",
        text: "text-blue-700",
        bg: "bg-blue-50",
        icon: "auto_stories",
    },
    CategoryDescriptor {
        category: Category::Health,
        name: "Health",
        color: "bg-green-500",
        border: "border-green-200",
        text: "text-green-700",
        bg: "bg-green-50",
        icon: "medical_services",
    },
    CategoryDescriptor {
        category: Category::Urgent,
        name: "Urgent",
        color: "bg-red-500",
        border: "border-red-200",
        text: "text-red-700",
        bg: "bg-red-50",
        icon: "priority_high",
    },
    CategoryDescriptor {
        category: Category::Design,
        name: "Design",
        color: "bg-purple-500",
        border: "border-purple-200",
        text: "text-purple-700",
        bg: "bg-purple-50",
        icon: "palette",
    },
    CategoryDescriptor {
        category: Category::Product,
        name: "Product",
        color: "bg-indigo-500",
        border: "border-indigo-200",
        text: "text-indigo-700",
        bg: "bg-indigo-50",
        icon: "rocket_launch",
    },
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in configured order.
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Learning,
        Category::Health,
        Category::Urgent,
        Category::Design,
        Category::Product,
    ];

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn descriptor(self) -> &'static CategoryDescriptor {
        // CATEGORIES is laid out in declaration order.
        &CATEGORIES[self as usize]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|err: UnknownCategory| {
            tracing::warn!("{}, filing under {}", err, Category::default());
            Category::default()
        })
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.name()
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Lifecycle marker of a task.
///
/// Stored as `"ToDo"`, `"In Progress"` or `"Done"`. Any other stored value
/// reads back as [`Status::ToDo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Status {
    #[default]
    ToDo,
    InProgress,
    Done,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::ToDo => "ToDo",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Done" => Status::Done,
            "In Progress" => Status::InProgress,
            _ => Status::ToDo,
        }
    }
}

impl From<Status> for &'static str {
    fn from(status: Status) -> Self {
        status.label()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

fn default_title() -> String {
    crate::mutation::UNTITLED_TASK.to_string()
}

/// Reads `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn title_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_title))
}

/// Reads an unknown or blank priority as no priority.
fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.as_str() {
        "High" => Some(Priority::High),
        "Medium" => Some(Priority::Medium),
        "Low" => Some(Priority::Low),
        _ => None,
    }))
}

/// A single tracked task, as persisted.
///
/// Only `id` is required when reading. Missing or `null` fields take their
/// defaults, and a missing `dateStr` leaves the task unscheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default = "default_title", deserialize_with = "title_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_str: TaskDate,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date_str: Option<TaskDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(
        default,
        deserialize_with = "lenient_priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl Task {
    /// Calendar date of `date_str`, if it parsed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date_str.date()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date_str.as_ref().and_then(TaskDate::date)
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }
}
