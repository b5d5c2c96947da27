use crate::error::{IndexError, ValidationError};
use crate::model::{normalize_text, Task, TaskAdded, TaskId};
use crate::persistence::TaskPersistence;

/// Ordered task sequence kept in lock-step with its persisted slot.
pub struct TaskStore {
    tasks: Vec<Task>,
    persistence: TaskPersistence,
}

impl TaskStore {
    /// Hydrate from whatever the persistence slot currently holds.
    pub fn hydrate(persistence: TaskPersistence) -> Self {
        let tasks = persistence.load();
        tracing::debug!(count = tasks.len(), "hydrated task store");
        Self { tasks, persistence }
    }

    pub fn add_task(&mut self, raw_text: &str) -> Result<TaskAdded, ValidationError> {
        let text = normalize_text(raw_text)?;
        let task = Task::new(text, false);
        let added = TaskAdded {
            position: self.tasks.len(),
            id: task.id,
            text: task.text.clone(),
        };
        self.tasks.push(task);
        tracing::debug!(position = added.position, "added task");
        self.persist();
        Ok(added)
    }

    pub fn toggle_task(&mut self, position: usize) -> Result<(), IndexError> {
        IndexError::check(position, self.tasks.len())?;
        let task = &mut self.tasks[position];
        task.completed = !task.completed;
        tracing::debug!(position, completed = task.completed, "toggled task");
        self.persist();
        Ok(())
    }

    pub fn remove_task(&mut self, position: usize) -> Result<(), IndexError> {
        IndexError::check(position, self.tasks.len())?;
        self.tasks.remove(position);
        tracing::debug!(position, "removed task");
        self.persist();
        Ok(())
    }

    /// Take the task at `from` out and reinsert it at `to`, where `to` indexes the
    /// sequence as it looks after the removal.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), IndexError> {
        let len = self.tasks.len();
        IndexError::check(from, len)?;
        IndexError::check(to, len)?;
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        tracing::debug!(from, to, "moved task");
        self.persist();
        Ok(())
    }

    pub fn count_active(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn persist(&mut self) {
        self.persistence.save(&self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::TASKS_SLOT;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn store_with(texts: &[&str]) -> (TaskStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::hydrate(TaskPersistence::new(storage.clone()));
        for text in texts {
            store.add_task(text).unwrap();
        }
        (store, storage)
    }

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.all_tasks().iter().map(|t| t.text.as_str()).collect()
    }

    #[rstest]
    #[case("abc")]
    #[case("   Buy milk   ")]
    #[case("a much longer task description")]
    #[case("😀a")]
    fn add_task_appends_active_task(#[case] raw: &str) {
        let (mut store, storage) = store_with(&["first task"]);
        let before = store.count_active();

        let added = store.add_task(raw).unwrap();

        assert_eq!(added.position, 1);
        assert_eq!(added.text, raw.trim());
        assert_eq!(store.count_active(), before + 1);
        assert_eq!(store.position_of(added.id), Some(1));
        let slot = storage.get(TASKS_SLOT).unwrap();
        assert!(slot.contains(raw.trim()));
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case("ab")]
    #[case(" x ")]
    fn add_task_rejects_short_text_without_mutation(#[case] raw: &str) {
        let (mut store, storage) = store_with(&["keep me"]);
        let slot_before = storage.get(TASKS_SLOT);

        assert_eq!(store.add_task(raw), Err(ValidationError::TooShort));
        assert_eq!(texts(&store), vec!["keep me"]);
        assert_eq!(storage.get(TASKS_SLOT), slot_before);
    }

    #[test]
    fn toggle_twice_restores_completed_flag() {
        let (mut store, storage) = store_with(&["Buy milk", "Walk dog"]);
        store.toggle_task(1).unwrap();
        assert!(store.all_tasks()[1].completed);
        assert_eq!(store.count_active(), 1);
        assert!(storage.get(TASKS_SLOT).unwrap().contains(r#""completed":true"#));

        store.toggle_task(1).unwrap();
        assert!(!store.all_tasks()[1].completed);
        assert_eq!(store.count_active(), 2);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let (mut store, storage) = store_with(&["aaa", "bbb", "ccc", "ddd"]);
        store.remove_task(1).unwrap();
        assert_eq!(texts(&store), vec!["aaa", "ccc", "ddd"]);
        assert_eq!(
            storage.get(TASKS_SLOT).as_deref(),
            Some(
                r#"[{"text":"aaa","completed":false},{"text":"ccc","completed":false},{"text":"ddd","completed":false}]"#
            )
        );
    }

    #[rstest]
    #[case(0, 2, vec!["BBB", "CCC", "AAA"])]
    #[case(2, 0, vec!["CCC", "AAA", "BBB"])]
    #[case(1, 1, vec!["AAA", "BBB", "CCC"])]
    #[case(0, 1, vec!["BBB", "AAA", "CCC"])]
    fn move_task_reinserts_after_removal(
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: Vec<&str>,
    ) {
        let (mut store, _storage) = store_with(&["AAA", "BBB", "CCC"]);
        store.move_task(from, to).unwrap();
        assert_eq!(texts(&store), expected);
    }

    #[test]
    fn out_of_bounds_positions_are_index_errors() {
        let (mut store, storage) = store_with(&["only one"]);
        let slot_before = storage.get(TASKS_SLOT);

        assert_eq!(
            store.toggle_task(1),
            Err(IndexError {
                position: 1,
                len: 1
            })
        );
        assert!(store.remove_task(5).is_err());
        assert!(store.move_task(0, 1).is_err());
        assert!(store.move_task(3, 0).is_err());
        assert_eq!(texts(&store), vec!["only one"]);
        assert_eq!(storage.get(TASKS_SLOT), slot_before);
    }

    #[test]
    fn hydrate_restores_persisted_order() {
        let storage = MemoryStorage::with_slot(
            TASKS_SLOT,
            r#"[{"text":"hij","completed":true},{"text":"abc","completed":false}]"#,
        );
        let store = TaskStore::hydrate(TaskPersistence::new(storage));
        assert_eq!(texts(&store), vec!["hij", "abc"]);
        assert_eq!(store.count_active(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_store_reports_nothing() {
        let (store, storage) = store_with(&[]);
        assert!(store.is_empty());
        assert_eq!(store.count_active(), 0);
        assert!(store.get(0).is_none());
        assert_eq!(storage.get(TASKS_SLOT), None);
    }
}
