use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::controller::ViewController;
use crate::persistence::TaskPersistence;
use crate::storage::{SlotStorage, SqliteStorage};
use crate::store::TaskStore;

/// Everything a session needs, built once at startup and handed down explicitly.
pub struct AppContext {
    config: AppConfig,
    persistence: TaskPersistence,
}

impl AppContext {
    /// Open the SQLite-backed slot storage under the configured data directory.
    pub fn open(config: AppConfig) -> Result<Self> {
        let storage = SqliteStorage::open(config.db_path())
            .context("failed to open task storage")?;
        Ok(Self::with_storage(config, storage))
    }

    pub fn with_storage<S: SlotStorage + 'static>(config: AppConfig, storage: S) -> Self {
        Self {
            config,
            persistence: TaskPersistence::new(storage),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_store(self) -> TaskStore {
        TaskStore::hydrate(self.persistence)
    }

    pub fn into_controller(self) -> ViewController {
        ViewController::new(self.into_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn store_survives_reopening_the_context() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();

        let mut store = AppContext::open(config.clone()).unwrap().into_store();
        store.add_task("Buy milk").unwrap();
        store.add_task("Walk the dog").unwrap();
        store.toggle_task(1).unwrap();
        drop(store);

        let reopened = AppContext::open(config).unwrap().into_store();
        let tasks = reopened.all_tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "Buy milk");
        assert!(!tasks[0].completed);
        assert_eq!(tasks[1].text, "Walk the dog");
        assert!(tasks[1].completed);
    }
}
