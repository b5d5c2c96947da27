//! Round-trips the task sequence through a single storage slot.

use serde::{Deserialize, Serialize};

use crate::model::{normalize_text, Task};
use crate::storage::SlotStorage;

/// Slot holding the serialized task sequence.
pub const TASKS_SLOT: &str = "tasks";

/// Persisted shape of a task. Field order is part of the format.
#[derive(Debug, Serialize)]
struct StoredTask<'a> {
    text: &'a str,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct LoadedTask {
    text: String,
    completed: bool,
}

pub struct TaskPersistence {
    storage: Box<dyn SlotStorage>,
}

impl TaskPersistence {
    pub fn new<S: SlotStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Overwrite the slot with the full sequence. Failures are logged and dropped.
    pub fn save(&mut self, tasks: &[Task]) {
        let records: Vec<StoredTask<'_>> = tasks
            .iter()
            .map(|task| StoredTask {
                text: &task.text,
                completed: task.completed,
            })
            .collect();

        let encoded = match serde_json::to_string(&records) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode tasks");
                return;
            }
        };

        match self.storage.write(TASKS_SLOT, &encoded) {
            Ok(()) => tracing::debug!(count = tasks.len(), "persisted tasks"),
            Err(err) => tracing::warn!(error = %err, "failed to persist tasks"),
        }
    }

    /// Read the slot back. Missing or malformed data reads as an empty list.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.storage.read(TASKS_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read tasks, starting empty");
                return Vec::new();
            }
        };

        let records: Vec<LoadedTask> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unparseable tasks slot");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter_map(|record| match normalize_text(&record.text) {
                Ok(text) => Some(Task::new(text, record.completed)),
                Err(_) => {
                    tracing::warn!(text = record.text.as_str(), "dropping invalid stored task");
                    None
                }
            })
            .collect()
    }
}
