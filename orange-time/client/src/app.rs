//! The application controller: owns the task collection and the screen
//! state, and turns user actions into store mutations and pushes.

use crate::persistence::{PendingPush, PersistenceClient};
use crate::repository::TaskRepository;
use chrono::{Local, NaiveDate, Utc};
use orange_time_core::editor::apply_edit;
use orange_time_core::timeline::{filter_by_category, group_by_period, search_tasks};
use orange_time_core::{
    CategoryFilter, DashboardSummary, EditError, GroupMode, Navigator, Task, TaskEdit, TaskStore,
    TimelineGroup, UpsertOutcome, View,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("No task is open in the editor")]
    NotEditing,
    #[error(transparent)]
    Edit(#[from] EditError),
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct App<R> {
    store: TaskStore,
    navigator: Navigator,
    editing: Option<Task>,
    more_menu_open: bool,
    timeline_category: CategoryFilter,
    group_mode: GroupMode,
    search_query: String,
    persistence: Arc<PersistenceClient<R>>,
    runtime: Handle,
}

impl<R: TaskRepository + 'static> App<R> {
    /// Loads the collection through `repository` and pushes it back once, so
    /// that seed data generated on a failed load gets stored.
    ///
    /// Must be called from within a tokio runtime; pushes are spawned on it.
    #[tracing::instrument(skip(repository))]
    pub async fn load(repository: R) -> (Self, PendingPush) {
        let persistence = Arc::new(PersistenceClient::new(repository));
        let mut store = TaskStore::new();
        store.load(persistence.fetch_all(today()).await);

        let app = Self {
            store,
            navigator: Navigator::new(),
            editing: None,
            more_menu_open: false,
            timeline_category: CategoryFilter::default(),
            group_mode: GroupMode::default(),
            search_query: String::new(),
            persistence,
            runtime: Handle::current(),
        };
        let push = app.commit();
        (app, push)
    }

    fn commit(&self) -> PendingPush {
        self.persistence
            .spawn_push(&self.runtime, self.store.snapshot())
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn current_view(&self) -> View {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Working copy of the task open in the editor.
    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn more_menu_open(&self) -> bool {
        self.more_menu_open
    }

    pub fn toggle_more_menu(&mut self) -> bool {
        self.more_menu_open = !self.more_menu_open;
        self.more_menu_open
    }

    /// Switches to `view`, returning the scroll offset to restore.
    fn show(&mut self, view: View, current_scroll: u32) -> u32 {
        self.more_menu_open = false;
        self.editing = None;
        self.navigator.show(view, current_scroll)
    }

    pub fn show_dashboard(&mut self, current_scroll: u32) -> u32 {
        self.show(View::Dashboard, current_scroll)
    }

    pub fn show_timeline(&mut self, current_scroll: u32) -> u32 {
        self.show(View::Timeline, current_scroll)
    }

    /// Opens the stored task `id` in the editor. Returns `None`, and stays on
    /// the current screen, when there is no such task.
    pub fn open_task(&mut self, id: &str, current_scroll: u32) -> Option<u32> {
        let task = self.store.get(id)?.clone();
        self.more_menu_open = false;
        self.editing = Some(task);
        Some(self.navigator.enter_editor(current_scroll))
    }

    /// Opens a fresh draft in the editor. The draft is stored on its first edit.
    pub fn create_task(&mut self, current_scroll: u32) -> u32 {
        let draft = self
            .store
            .create_draft(today(), Utc::now().timestamp_millis());
        tracing::debug!("Created draft {}", draft.id);
        self.more_menu_open = false;
        self.editing = Some(draft);
        self.navigator.enter_editor(current_scroll)
    }

    /// Applies `edit` to the task in the editor and commits it to the store.
    ///
    /// A rejected edit changes nothing and pushes nothing.
    #[tracing::instrument(skip(self))]
    pub fn edit(&mut self, edit: TaskEdit) -> Result<PendingPush, AppError> {
        let today = today();
        let task = self.editing.as_mut().ok_or(AppError::NotEditing)?;
        let mut edited = task.clone();
        apply_edit(&mut edited, edit, today)?;
        *task = edited.clone();

        if self.store.upsert(edited, today) == UpsertOutcome::Inserted {
            tracing::info!("Stored new task {}", task.id);
        }
        Ok(self.commit())
    }

    /// Leaves the editor, returning the scroll offset of the screen it goes back to.
    pub fn close_editor(&mut self) -> u32 {
        self.more_menu_open = false;
        self.editing = None;
        self.navigator.leave_editor()
    }

    /// Removes the task with `id` and pushes the collection, even when no task
    /// had that id.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> PendingPush {
        if self.store.remove(id).is_some() {
            tracing::info!("Removed task {}", id);
        }
        self.commit()
    }

    /// Deletes the task open in the editor and leaves the editor.
    ///
    /// Returns the push and the scroll offset of the screen shown afterwards.
    pub fn delete_editing_task(&mut self) -> Result<(PendingPush, u32), AppError> {
        let task = self.editing.take().ok_or(AppError::NotEditing)?;
        let push = self.remove(&task.id);
        Ok((push, self.close_editor()))
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_tasks(self.store.all())
    }

    /// Timeline groups after the category filter and the search query.
    pub fn timeline(&self) -> Vec<TimelineGroup<'_>> {
        let filtered = filter_by_category(self.store.all(), self.timeline_category);
        let matching = search_tasks(filtered, &self.search_query);
        group_by_period(matching, self.group_mode)
    }

    pub fn timeline_category(&self) -> CategoryFilter {
        self.timeline_category
    }

    pub fn set_timeline_category(&mut self, category: CategoryFilter) {
        self.timeline_category = category;
    }

    pub fn group_mode(&self) -> GroupMode {
        self.group_mode
    }

    pub fn set_group_mode(&mut self, mode: GroupMode) {
        self.group_mode = mode;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockTaskRepository, RepositoryError};
    use orange_time_core::date::format_date;
    use orange_time_core::{Category, Status, seed};

    fn five_tasks() -> Vec<Task> {
        seed::generate(today()).into_iter().take(5).collect()
    }

    fn repository_with(tasks: Vec<Task>, expected_pushes: usize) -> MockTaskRepository {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_fetch_tasks()
            .times(1)
            .returning(move || Ok(tasks.clone()));
        repository
            .expect_save_tasks()
            .times(expected_pushes)
            .returning(|_| Ok(()));
        repository
    }

    async fn loaded(repository: MockTaskRepository) -> App<MockTaskRepository> {
        let (app, push) = App::load(repository).await;
        push.finished().await;
        app
    }

    #[tokio::test]
    async fn load_pushes_loaded_collection_once() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_fetch_tasks()
            .times(1)
            .returning(|| Ok(five_tasks()));
        repository
            .expect_save_tasks()
            .withf(|tasks| tasks.len() == 5)
            .times(1)
            .returning(|_| Ok(()));

        let app = loaded(repository).await;

        assert_eq!(app.store().len(), 5);
        assert_eq!(app.current_view(), View::Dashboard);
    }

    #[tokio::test]
    async fn load_stores_seed_data_when_storage_is_down() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_fetch_tasks()
            .times(1)
            .returning(|| Err(RepositoryError::Unavailable("offline".to_string())));
        repository
            .expect_save_tasks()
            .withf(|tasks| tasks.len() == 17)
            .times(1)
            .returning(|_| Ok(()));

        let app = loaded(repository).await;

        let summary = app.dashboard();
        assert_eq!(summary.counts.total, 17);
        assert_eq!(summary.counts.done, 4);
    }

    #[tokio::test]
    async fn removing_unknown_id_still_pushes_unchanged_collection() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_fetch_tasks()
            .times(1)
            .returning(|| Ok(five_tasks()));
        repository
            .expect_save_tasks()
            .withf(|tasks| tasks.len() == 5)
            .times(2)
            .returning(|_| Ok(()));
        let mut app = loaded(repository).await;

        app.remove("does-not-exist").finished().await;

        assert_eq!(app.store().all(), five_tasks().as_slice());
    }

    #[tokio::test]
    async fn creating_a_task_stores_nothing_until_first_edit() {
        let mut app = loaded(repository_with(Vec::new(), 2)).await;

        let scroll = app.create_task(120);
        assert_eq!(scroll, 0);
        assert_eq!(app.current_view(), View::Editor);
        assert!(app.store().is_empty());

        app.edit(TaskEdit::Title("Plan sprint".to_string()))
            .unwrap()
            .finished()
            .await;

        assert_eq!(app.store().len(), 1);
        let stored = &app.store().all()[0];
        assert_eq!(stored.title, "Plan sprint");
        assert_eq!(stored.category, Category::Personal);
        assert!(stored.id.starts_with("new-"));
        assert_eq!(app.editing(), Some(stored));
    }

    #[tokio::test]
    async fn marking_done_fills_end_date_with_today() {
        let mut app = loaded(repository_with(Vec::new(), 2)).await;
        app.create_task(0);

        app.edit(TaskEdit::Status(Status::Done))
            .unwrap()
            .finished()
            .await;

        let stored = &app.store().all()[0];
        let end = stored.end_date_str.as_ref().unwrap();
        assert_eq!(end.as_str(), format_date(today()));
    }

    #[tokio::test]
    async fn rejected_edit_changes_nothing() {
        let tasks = five_tasks();
        let id = tasks[0].id.clone();
        let start = tasks[0].date().unwrap();
        let mut app = loaded(repository_with(tasks, 1)).await;
        app.open_task(&id, 0).unwrap();
        let before = app.editing().cloned();

        let result = app.edit(TaskEdit::EndDate(start.pred_opt()));

        assert!(matches!(
            result,
            Err(AppError::Edit(EditError::EndBeforeStart { .. }))
        ));
        assert_eq!(app.editing().cloned(), before);
    }

    #[tokio::test]
    async fn editing_without_open_task_is_an_error() {
        let mut app = loaded(repository_with(Vec::new(), 1)).await;

        let result = app.edit(TaskEdit::Title("Nothing open".to_string()));

        assert!(matches!(result, Err(AppError::NotEditing)));
    }

    #[tokio::test]
    async fn editor_returns_to_the_screen_it_was_opened_from() {
        let tasks = five_tasks();
        let id = tasks[2].id.clone();
        let mut app = loaded(repository_with(tasks, 1)).await;
        app.show_timeline(40);

        assert_eq!(app.open_task(&id, 300), Some(0));
        assert_eq!(app.navigator().previous(), View::Timeline);

        assert_eq!(app.close_editor(), 300);
        assert_eq!(app.current_view(), View::Timeline);
        assert!(app.editing().is_none());
    }

    #[tokio::test]
    async fn opening_unknown_task_stays_put() {
        let mut app = loaded(repository_with(five_tasks(), 1)).await;

        assert_eq!(app.open_task("missing", 10), None);
        assert_eq!(app.current_view(), View::Dashboard);
    }

    #[tokio::test]
    async fn deleting_from_editor_removes_task_and_goes_back() {
        let tasks = five_tasks();
        let id = tasks[1].id.clone();
        let mut app = loaded(repository_with(tasks, 2)).await;
        app.show_timeline(0);
        app.open_task(&id, 75);

        let (push, scroll) = app.delete_editing_task().unwrap();
        push.finished().await;

        assert_eq!(scroll, 75);
        assert_eq!(app.current_view(), View::Timeline);
        assert_eq!(app.store().len(), 4);
        assert!(!app.store().contains(&id));
    }

    #[tokio::test]
    async fn navigation_closes_more_menu() {
        let mut app = loaded(repository_with(Vec::new(), 1)).await;

        assert!(app.toggle_more_menu());
        app.show_timeline(0);

        assert!(!app.more_menu_open());
    }

    #[tokio::test]
    async fn timeline_applies_category_then_search() {
        let mut app = loaded(repository_with(seed::generate(today()), 1)).await;

        app.set_timeline_category(CategoryFilter::Only(Category::Health));
        app.set_search_query("task 2");
        let groups = app.timeline();

        let titles: Vec<&str> = groups
            .iter()
            .flat_map(|group| group.tasks.iter().map(|task| task.title.as_str()))
            .collect();
        assert_eq!(titles.len(), 1);
        assert!(titles[0].starts_with("Health Task 2"));
    }

    #[tokio::test]
    async fn timeline_groups_by_month() {
        let mut app = loaded(repository_with(seed::generate(today()), 1)).await;

        app.set_group_mode(GroupMode::Month);
        let groups = app.timeline();

        let grouped: usize = groups.iter().map(|group| group.tasks.len()).sum();
        assert_eq!(grouped, 17);
        assert!(groups.iter().any(|group| group.key == "June, 2026"));
        assert_eq!(app.group_mode(), GroupMode::Month);
    }
}
