use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use taskboard_core::{PageRequest, Paginated, TaskboardError, TaskboardResult};
use taskboard_domain::{Board, BoardSummary, NewTask, Notification, Task, TaskList};
use tokio::sync::RwLock;

use crate::store::workspace::WorkspaceData;
use crate::traits::{NotificationStore, TaskStore};

/// In-memory store used when no session or data file is available.
/// Nothing survives the process.
#[derive(Debug, Default)]
pub struct DemoStore {
    data: RwLock<WorkspaceData>,
    fail_status_updates: AtomicBool,
}

impl DemoStore {
    /// Store pre-populated with the sample board and notifications.
    pub fn seeded() -> Self {
        Self::with_data(WorkspaceData::demo())
    }

    pub fn with_data(data: WorkspaceData) -> Self {
        Self {
            data: RwLock::new(data),
            fail_status_updates: AtomicBool::new(false),
        }
    }

    /// Make every `update_task_status` call fail with a connection error.
    pub fn set_fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for DemoStore {
    async fn list_boards(&self) -> TaskboardResult<Vec<BoardSummary>> {
        Ok(self.data.read().await.list_boards())
    }

    async fn create_board(&self, name: String, list_names: Vec<String>) -> TaskboardResult<Board> {
        self.data.write().await.create_board(&name, &list_names)
    }

    async fn get_board(&self, board_id: &str) -> TaskboardResult<Board> {
        self.data.read().await.get_board(board_id).cloned()
    }

    async fn get_lists(&self, board_id: &str) -> TaskboardResult<Vec<TaskList>> {
        let data = self.data.read().await;
        Ok(data.get_board(board_id)?.lists.clone())
    }

    async fn get_tasks(
        &self,
        list_id: &str,
        page: PageRequest,
    ) -> TaskboardResult<Paginated<Task>> {
        self.data.read().await.get_tasks(list_id, page)
    }

    async fn create_task(&self, list_id: &str, task: NewTask) -> TaskboardResult<Task> {
        self.data.write().await.create_task(list_id, task)
    }

    async fn delete_task(&self, task_id: &str) -> TaskboardResult<()> {
        self.data.write().await.delete_task(task_id)
    }

    async fn update_task_status(
        &self,
        task_id: &str,
        new_list_id: &str,
        position: usize,
    ) -> TaskboardResult<()> {
        if self.fail_status_updates.load(Ordering::SeqCst) {
            return Err(TaskboardError::Connection(format!(
                "Status update for task {} rejected",
                task_id
            )));
        }
        self.data
            .write()
            .await
            .update_task_status(task_id, new_list_id, position)
    }

    async fn update_task_order(
        &self,
        list_id: &str,
        task_ids: Vec<String>,
    ) -> TaskboardResult<()> {
        self.data.write().await.update_task_order(list_id, &task_ids)
    }
}

#[async_trait]
impl NotificationStore for DemoStore {
    async fn list_notifications(&self) -> TaskboardResult<Vec<Notification>> {
        Ok(self.data.read().await.notifications.clone())
    }

    async fn unread_count(&self) -> TaskboardResult<usize> {
        Ok(self.data.read().await.unread_count())
    }

    async fn mark_read(&self, notification_id: &str) -> TaskboardResult<()> {
        self.data.write().await.mark_read(notification_id)
    }

    async fn mark_all_read(&self) -> TaskboardResult<usize> {
        Ok(self.data.write().await.mark_all_read())
    }
}
