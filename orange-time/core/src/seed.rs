//! Sample collection shown when stored tasks cannot be loaded.

use crate::date::TaskDate;
use crate::model::{Category, Priority, Status, Task};
use chrono::{Days, NaiveDate};

const SEEDED_CATEGORIES: [Category; 4] = [
    Category::Personal,
    Category::Learning,
    Category::Health,
    Category::Urgent,
];
const TASKS_PER_CATEGORY: u64 = 3;
const VERBS: [&str; 3] = ["Review", "Analyze", "Create"];
const SUBJECTS: [&str; 3] = ["Reports", "Design", "Code"];

fn clock_label(hour: u32) -> String {
    let display_hour = if hour > 12 { hour - 12 } else { hour };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    format!("{display_hour}:00 {meridiem}")
}

fn generated_task(category: Category, index: u64, today: NaiveDate) -> Task {
    let slot = index as usize % 3;
    let start = today + Days::new(index * 3);
    let end = start + Days::new(2);
    let hour = 9 + index as u32;

    Task {
        id: format!("{category}-{index}"),
        title: format!(
            "{category} Task {}: {} {}",
            index + 1,
            VERBS[slot],
            SUBJECTS[slot]
        ),
        category,
        date_str: TaskDate::from_date(start),
        end_date_str: Some(TaskDate::from_date(end)),
        start_time: Some(clock_label(hour)),
        end_time: Some(clock_label(hour + 1)),
        description: format!(
            "This is a generated description for {category} task number {}.",
            index + 1
        ),
        status: match slot {
            0 => Status::Done,
            1 => Status::InProgress,
            _ => Status::ToDo,
        },
        priority: Some(if slot == 0 {
            Priority::High
        } else {
            Priority::Medium
        }),
        content: format!(
            "Detailed notes for {category} Task {}.\n\nEnsure the following steps are completed:\n- Initial assessment\n- Execution phase\n- Review and finalize",
            index + 1
        ),
    }
}

fn planned_task(
    id: &str,
    title: &str,
    category: Category,
    date: &str,
    description: &str,
    status: Status,
    priority: Priority,
    content: &str,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        category,
        date_str: TaskDate::parse_lenient(date),
        end_date_str: None,
        start_time: None,
        end_time: None,
        description: description.to_string(),
        status,
        priority: Some(priority),
        content: content.to_string(),
    }
}

fn june_2026_tasks() -> Vec<Task> {
    vec![
        planned_task(
            "june-26-1",
            "Summer Product Launch v2.0",
            Category::Product,
            "Jun 05, 2026",
            "Official release of the new mobile application including new AI features.",
            Status::ToDo,
            Priority::High,
            "Launch Checklist:\n1. App Store Submission\n2. Press Release\n3. Social Media Campaign",
        ),
        planned_task(
            "june-26-2",
            "Advanced UX Workshop",
            Category::Design,
            "Jun 12, 2026",
            "Attending the 3-day workshop on micro-interactions and accessibility.",
            Status::ToDo,
            Priority::Medium,
            "Bring portfolio for review.",
        ),
        planned_task(
            "june-26-3",
            "Annual Health Checkup",
            Category::Health,
            "Jun 15, 2026",
            "Full body checkup at City Medical Center.",
            Status::ToDo,
            Priority::High,
            "Fasting required for 12 hours.",
        ),
        planned_task(
            "june-26-4",
            "Rust Programming Masterclass",
            Category::Learning,
            "Jun 20, 2026",
            "Start of the 4-week intensive Rust systems programming course.",
            Status::InProgress,
            Priority::Medium,
            "Module 1: Ownership and Borrowing",
        ),
        planned_task(
            "june-26-5",
            "Server Migration",
            Category::Urgent,
            "Jun 28, 2026",
            "Migrating legacy database to the new cloud cluster.",
            Status::ToDo,
            Priority::High,
            "Ensure backup is completed before starting.",
        ),
    ]
}

/// Builds the sample collection relative to `today`, sorted by date.
///
/// The same `today` always yields the same collection.
pub fn generate(today: NaiveDate) -> Vec<Task> {
    let mut tasks: Vec<Task> = SEEDED_CATEGORIES
        .into_iter()
        .flat_map(|category| {
            (0..TASKS_PER_CATEGORY).map(move |index| generated_task(category, index, today))
        })
        .collect();
    tasks.extend(june_2026_tasks());
    tasks.sort_by_key(|task| task.date_str.sort_key());
    tasks
}
