use crate::model::Task;

/// The authoritative in-memory task collection.
///
/// Tasks are always held in ascending order of their parsed start date.
/// Tasks whose date did not parse come after every dated task. Equal keys
/// keep their relative order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection.
    #[tracing::instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.sort();
        tracing::debug!("Loaded {} tasks into the store", self.tasks.len());
    }

    /// Returns the full ordered collection.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Owned copy of the collection, as handed to the persistence layer.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub(crate) fn sort(&mut self) {
        // sort_by_key is stable
        self.tasks.sort_by_key(|task| task.date_str.sort_key());
    }
}
