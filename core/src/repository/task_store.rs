use anyhow::{Context, Result};
use tracing::debug;

use crate::model::task::Task;
use crate::repository::traits::BucketStore;

const TASKS_KEY: &str = "tasks";

/// Task lists persisted one bucket per list name.
///
/// The whole list is encoded as one JSON array and written with a single
/// `put`, so a list is never stored half-updated.
pub struct TaskStore<S: BucketStore> {
    store: S,
}

impl<S: BucketStore> TaskStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn ensure(&self, name: &str) -> Result<()> {
        self.store
            .ensure(name)
            .with_context(|| format!("creating task list '{}'", name))
    }

    /// Returns the stored tasks for `name`. A list with no stored value is
    /// initialized to `[]` on the spot.
    pub fn load(&self, name: &str) -> Result<Vec<Task>> {
        let bytes = self
            .store
            .get(name, TASKS_KEY)
            .with_context(|| format!("loading task list '{}'", name))?;

        match bytes {
            Some(bytes) => {
                let tasks: Option<Vec<Task>> = serde_json::from_slice(&bytes)
                    .with_context(|| format!("decoding task list '{}'", name))?;
                let tasks = tasks.unwrap_or_default();
                debug!(list = name, count = tasks.len(), "tasks loaded");
                Ok(tasks)
            }
            None => {
                self.ensure(name)?;
                self.save(name, &[])?;
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&self, name: &str, tasks: &[Task]) -> Result<()> {
        let bytes = serde_json::to_vec(tasks)
            .with_context(|| format!("encoding task list '{}'", name))?;
        self.store
            .put(name, TASKS_KEY, &bytes)
            .with_context(|| format!("saving task list '{}'", name))?;
        debug!(list = name, count = tasks.len(), "tasks saved");
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.store
    }
}
