//! Field edits made in the task editor and the rules that guard them.

use crate::date::{TaskDate, format_date};
use crate::model::{Category, Priority, Status, Task};
use crate::mutation::apply_completion_rule;
use chrono::NaiveDate;
use thiserror::Error;

/// A single field change on the task being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    Title(String),
    Category(Category),
    /// Moving the start past the end date clears the end date.
    StartDate(NaiveDate),
    /// `None` clears the end date.
    EndDate(Option<NaiveDate>),
    StartTime(Option<String>),
    EndTime(Option<String>),
    Description(String),
    Status(Status),
    Priority(Option<Priority>),
    Content(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: String, end: String },
}

/// Applies `edit` to `task`. A rejected edit leaves the task untouched.
pub fn apply_edit(task: &mut Task, edit: TaskEdit, today: NaiveDate) -> Result<(), EditError> {
    match edit {
        TaskEdit::Title(title) => task.title = title,
        TaskEdit::Category(category) => task.category = category,
        TaskEdit::StartDate(start) => {
            if task.end_date().is_some_and(|end| start > end) {
                task.end_date_str = None;
            }
            task.date_str = TaskDate::from_date(start);
        }
        TaskEdit::EndDate(Some(end)) => {
            if let Some(start) = task.date().filter(|start| end < *start) {
                return Err(EditError::EndBeforeStart {
                    start: format_date(start),
                    end: format_date(end),
                });
            }
            task.end_date_str = Some(TaskDate::from_date(end));
        }
        TaskEdit::EndDate(None) => task.end_date_str = None,
        TaskEdit::StartTime(time) => task.start_time = time,
        TaskEdit::EndTime(time) => task.end_time = time,
        TaskEdit::Description(description) => task.description = description,
        TaskEdit::Status(status) => {
            task.status = status;
            apply_completion_rule(task, today);
        }
        TaskEdit::Priority(priority) => task.priority = priority,
        TaskEdit::Content(content) => task.content = content,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2026, 10, 18)
    }

    fn draft_starting(start: NaiveDate) -> Task {
        let mut task = TaskStore::new().create_draft(today(), 42);
        task.date_str = TaskDate::from_date(start);
        task
    }

    #[test]
    fn can_edit_plain_fields() {
        let mut task = draft_starting(ymd(2026, 6, 5));

        apply_edit(&mut task, TaskEdit::Title("Launch".to_string()), today()).unwrap();
        apply_edit(&mut task, TaskEdit::Category(Category::Product), today()).unwrap();
        apply_edit(&mut task, TaskEdit::Priority(Some(Priority::High)), today()).unwrap();
        apply_edit(&mut task, TaskEdit::StartTime(Some("9:00 AM".to_string())), today()).unwrap();
        apply_edit(&mut task, TaskEdit::Content("Checklist".to_string()), today()).unwrap();

        assert_eq!(task.title, "Launch");
        assert_eq!(task.category, Category::Product);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.start_time.as_deref(), Some("9:00 AM"));
        assert_eq!(task.content, "Checklist");
    }

    #[test]
    fn marking_done_fills_missing_end_date_with_today() {
        let mut task = draft_starting(ymd(2026, 6, 5));

        apply_edit(&mut task, TaskEdit::Status(Status::Done), today()).unwrap();

        assert_eq!(
            task.end_date_str.as_ref().map(TaskDate::as_str),
            Some("Oct 18, 2026")
        );
    }

    #[test]
    fn marking_in_progress_leaves_end_date_alone() {
        let mut task = draft_starting(ymd(2026, 6, 5));

        apply_edit(&mut task, TaskEdit::Status(Status::InProgress), today()).unwrap();

        assert_eq!(task.end_date_str, None);
    }

    #[test]
    fn rejects_end_date_before_start() {
        let mut task = draft_starting(ymd(2026, 6, 5));
        let before = task.clone();

        let result = apply_edit(&mut task, TaskEdit::EndDate(Some(ymd(2026, 6, 1))), today());

        assert_eq!(
            result,
            Err(EditError::EndBeforeStart {
                start: "Jun 5, 2026".to_string(),
                end: "Jun 1, 2026".to_string(),
            })
        );
        assert_eq!(task, before);
    }

    #[test]
    fn accepts_end_date_on_start_day() {
        let mut task = draft_starting(ymd(2026, 6, 5));

        apply_edit(&mut task, TaskEdit::EndDate(Some(ymd(2026, 6, 5))), today()).unwrap();

        assert_eq!(task.end_date(), Some(ymd(2026, 6, 5)));
    }

    #[test]
    fn moving_start_past_end_clears_end() {
        let mut task = draft_starting(ymd(2026, 6, 5));
        apply_edit(&mut task, TaskEdit::EndDate(Some(ymd(2026, 6, 7))), today()).unwrap();

        apply_edit(&mut task, TaskEdit::StartDate(ymd(2026, 6, 10)), today()).unwrap();

        assert_eq!(task.date_str.as_str(), "Jun 10, 2026");
        assert_eq!(task.end_date_str, None);
    }

    #[test]
    fn moving_start_before_end_keeps_end() {
        let mut task = draft_starting(ymd(2026, 6, 5));
        apply_edit(&mut task, TaskEdit::EndDate(Some(ymd(2026, 6, 7))), today()).unwrap();

        apply_edit(&mut task, TaskEdit::StartDate(ymd(2026, 6, 6)), today()).unwrap();

        assert_eq!(task.end_date(), Some(ymd(2026, 6, 7)));
    }

    #[test]
    fn can_clear_end_date() {
        let mut task = draft_starting(ymd(2026, 6, 5));
        apply_edit(&mut task, TaskEdit::EndDate(Some(ymd(2026, 6, 7))), today()).unwrap();

        apply_edit(&mut task, TaskEdit::EndDate(None), today()).unwrap();

        assert_eq!(task.end_date_str, None);
    }
}
