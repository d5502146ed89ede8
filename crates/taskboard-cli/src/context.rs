use std::path::PathBuf;
use std::sync::Arc;
use taskboard_core::{AppConfig, PageRequest, TaskboardResult};
use taskboard_persistence::{BoardSession, DataAccess, DataMode, NotificationStore, TaskStore};

/// Everything a command handler needs: resolved config and the one data
/// source chosen for this invocation.
pub struct CliContext {
    pub config: AppConfig,
    access: DataAccess,
}

impl CliContext {
    pub fn new(file: Option<String>, demo: bool) -> TaskboardResult<Self> {
        let mut config = AppConfig::load();
        if demo {
            config = config.with_demo_mode(true);
            config.data_file = None;
        } else {
            config = config.with_data_file(file.map(PathBuf::from));
        }

        let access = DataAccess::connect(&config)?;
        Ok(Self { config, access })
    }

    pub fn mode(&self) -> DataMode {
        self.access.mode()
    }

    pub fn tasks(&self) -> Arc<dyn TaskStore> {
        self.access.tasks()
    }

    pub fn notifications(&self) -> Arc<dyn NotificationStore> {
        self.access.notifications()
    }

    pub async fn open_session(&self, board_id: &str) -> TaskboardResult<BoardSession> {
        Ok(BoardSession::open(self.tasks(), board_id)
            .await?
            .with_persist_reorder(self.config.persist_reorder))
    }

    pub fn page_request(&self, page: usize, per_page: Option<usize>) -> TaskboardResult<PageRequest> {
        PageRequest::new(page, per_page.unwrap_or(self.config.default_per_page))
    }
}
