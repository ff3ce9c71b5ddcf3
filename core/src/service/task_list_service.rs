use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use tracing::info;

use crate::model::task::Task;
use crate::repository::{BucketStore, TaskStore};
use crate::view;

/// One named task list and its working copy.
///
/// Every mutation re-reads the store, applies the change, and writes the
/// whole list back before the working copy is replaced. Tasks are addressed
/// by their position in the list.
pub struct TaskListService<S: BucketStore> {
    store: TaskStore<S>,
    name: String,
    tasks: Vec<Task>,
    selected: Option<usize>,
}

impl<S: BucketStore> TaskListService<S> {
    pub fn open(store: TaskStore<S>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        store.ensure(&name)?;
        let tasks = store.load(&name)?;
        info!(list = %name, count = tasks.len(), "task list opened");
        Ok(Self {
            store,
            name,
            tasks,
            selected: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects `index`, or clears the selection when it is out of range.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.tasks.len());
    }

    pub fn lines(&self) -> Vec<String> {
        view::render_all(&self.tasks)
    }

    /// Appends a pending task. Blank text is ignored and returns `false`.
    pub fn add(&mut self, text: &str) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        let mut tasks = self.store.load(&self.name)?;
        tasks.push(Task::new(text));
        self.commit(tasks)?;
        info!(list = %self.name, count = self.tasks.len(), "task added");
        Ok(true)
    }

    pub fn toggle_at(&mut self, index: Option<usize>) -> Result<bool> {
        self.toggle_at_with(index, || Local::now().fixed_offset())
    }

    /// Flips the done state of the task at `index` and keeps it selected.
    /// `None` or an index past the end leaves everything as it was.
    pub fn toggle_at_with<F>(&mut self, index: Option<usize>, now: F) -> Result<bool>
    where
        F: FnOnce() -> DateTime<FixedOffset>,
    {
        let Some(i) = index else {
            return Ok(false);
        };
        let mut tasks = self.store.load(&self.name)?;
        let Some(task) = tasks.get_mut(i) else {
            return Ok(false);
        };
        task.toggle(now());
        let done = task.is_done();
        self.commit(tasks)?;
        self.selected = Some(i);
        info!(list = %self.name, index = i, done, "task toggled");
        Ok(true)
    }

    /// Drops every done task, keeping the order of the rest, and clears the
    /// selection. Returns how many tasks were removed.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let mut tasks = self.store.load(&self.name)?;
        let before = tasks.len();
        tasks.retain(|t| !t.is_done());
        let removed = before - tasks.len();
        self.commit(tasks)?;
        self.selected = None;
        info!(list = %self.name, removed, "completed tasks cleared");
        Ok(removed)
    }

    fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.store.save(&self.name, &tasks)?;
        self.tasks = tasks;
        Ok(())
    }
}
