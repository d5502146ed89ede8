//! Single decision point between demo data and real persistence.
//!
//! Consumers receive trait objects and never check which backend they
//! are talking to.

use std::sync::Arc;
use taskboard_core::{AppConfig, TaskboardError, TaskboardResult};

use crate::store::{DemoStore, JsonFileStore};
use crate::traits::{NotificationStore, TaskStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Demo,
    File,
}

#[derive(Clone)]
pub struct DataAccess {
    mode: DataMode,
    tasks: Arc<dyn TaskStore>,
    notifications: Arc<dyn NotificationStore>,
}

impl DataAccess {
    /// A configured data file wins over demo mode; with neither there is
    /// nothing to serve.
    pub fn connect(config: &AppConfig) -> TaskboardResult<Self> {
        if let Some(path) = &config.data_file {
            tracing::info!("Using data file {}", path.display());
            let store = Arc::new(JsonFileStore::new(path));
            return Ok(Self {
                mode: DataMode::File,
                tasks: store.clone(),
                notifications: store,
            });
        }

        if config.demo_mode {
            tracing::info!("No data file configured, serving demo data");
            return Ok(Self::demo(Arc::new(DemoStore::seeded())));
        }

        Err(TaskboardError::Config(
            "No data source configured: pass a data file or enable demo mode".to_string(),
        ))
    }

    pub fn demo(store: Arc<DemoStore>) -> Self {
        Self {
            mode: DataMode::Demo,
            tasks: store.clone(),
            notifications: store,
        }
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn tasks(&self) -> Arc<dyn TaskStore> {
        Arc::clone(&self.tasks)
    }

    pub fn notifications(&self) -> Arc<dyn NotificationStore> {
        Arc::clone(&self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_demo_mode_without_file() {
        let access = DataAccess::connect(&AppConfig::default()).unwrap();
        assert_eq!(access.mode(), DataMode::Demo);
        assert_eq!(access.tasks().list_boards().await.unwrap().len(), 1);
        assert_eq!(access.notifications().unread_count().await.unwrap(), 2);
    }

    #[test]
    fn test_file_wins_over_demo() {
        let config = AppConfig::default().with_data_file(Some(PathBuf::from("board.json")));
        let access = DataAccess::connect(&config).unwrap();
        assert_eq!(access.mode(), DataMode::File);
    }

    #[test]
    fn test_no_source_is_an_error() {
        let config = AppConfig::default().with_demo_mode(false);
        assert!(matches!(
            DataAccess::connect(&config),
            Err(TaskboardError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_shared_demo_store() {
        let store = Arc::new(DemoStore::seeded());
        let access = DataAccess::demo(store.clone());

        access.notifications().mark_all_read().await.unwrap();
        assert_eq!(store.unread_count().await.unwrap(), 0);
    }
}
