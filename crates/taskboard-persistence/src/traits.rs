use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{PageRequest, Paginated, TaskboardResult};
use taskboard_domain::{Board, BoardSummary, NewTask, Notification, Task, TaskList};
use uuid::Uuid;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata for persistence operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Persistence for boards, lists and tasks.
///
/// Reads are cold-start sources for a board session; the session never
/// reads mid-move. `update_task_status` must tolerate at-least-once
/// delivery: repeating a call that already took effect succeeds without
/// further change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_boards(&self) -> TaskboardResult<Vec<BoardSummary>>;

    async fn create_board(&self, name: String, list_names: Vec<String>) -> TaskboardResult<Board>;

    async fn get_board(&self, board_id: &str) -> TaskboardResult<Board>;

    async fn get_lists(&self, board_id: &str) -> TaskboardResult<Vec<TaskList>>;

    async fn get_tasks(&self, list_id: &str, page: PageRequest)
        -> TaskboardResult<Paginated<Task>>;

    /// Append a new task to the end of `list_id`.
    async fn create_task(&self, list_id: &str, task: NewTask) -> TaskboardResult<Task>;

    async fn delete_task(&self, task_id: &str) -> TaskboardResult<()>;

    /// Re-parent a task to `new_list_id` at `position` (clamped to the
    /// list's length).
    async fn update_task_status(
        &self,
        task_id: &str,
        new_list_id: &str,
        position: usize,
    ) -> TaskboardResult<()>;

    /// Persist the full order of a list. `task_ids` must be a permutation
    /// of the list's current tasks.
    async fn update_task_order(&self, list_id: &str, task_ids: Vec<String>)
        -> TaskboardResult<()>;
}

/// Read/unread notification feed. Independent of board data.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn list_notifications(&self) -> TaskboardResult<Vec<Notification>>;

    async fn unread_count(&self) -> TaskboardResult<usize>;

    /// Marking an already-read notification is a success.
    async fn mark_read(&self, notification_id: &str) -> TaskboardResult<()>;

    /// Returns how many notifications changed state.
    async fn mark_all_read(&self) -> TaskboardResult<usize>;
}
