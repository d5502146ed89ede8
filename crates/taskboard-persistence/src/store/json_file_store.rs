use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{PageRequest, Paginated, TaskboardError, TaskboardResult};
use taskboard_domain::{Board, BoardSummary, NewTask, Notification, Task, TaskList};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::store::atomic_writer::AtomicWriter;
use crate::store::workspace::WorkspaceData;
use crate::traits::{NotificationStore, PersistenceMetadata, TaskStore, FORMAT_VERSION};

/// Wrapper structure for the JSON file format
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: WorkspaceData,
}

impl JsonEnvelope {
    pub fn empty() -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(Uuid::new_v4()),
            data: WorkspaceData::default(),
        }
    }

    pub fn to_json_string(&self) -> TaskboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// JSON file-backed store. Every write reloads the file, applies the
/// change and replaces the file atomically; a missing file reads as an
/// empty workspace.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
            lock: Mutex::new(()),
        }
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    pub async fn load(&self) -> TaskboardResult<WorkspaceData> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path).await? else {
            return Ok(WorkspaceData::default());
        };

        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != FORMAT_VERSION {
            return Err(TaskboardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(envelope.data)
    }

    pub async fn save(&self, data: WorkspaceData) -> TaskboardResult<PersistenceMetadata> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            data,
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope)?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );
        Ok(envelope.metadata)
    }

    async fn read<T>(&self, f: impl FnOnce(&WorkspaceData) -> TaskboardResult<T>) -> TaskboardResult<T> {
        let _guard = self.lock.lock().await;
        let data = self.load().await?;
        f(&data)
    }

    /// Load, apply `f`, and save only if `f` succeeded.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut WorkspaceData) -> TaskboardResult<T>,
    ) -> TaskboardResult<T> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        let result = f(&mut data)?;
        self.save(data).await?;
        Ok(result)
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn list_boards(&self) -> TaskboardResult<Vec<BoardSummary>> {
        self.read(|data| Ok(data.list_boards())).await
    }

    async fn create_board(&self, name: String, list_names: Vec<String>) -> TaskboardResult<Board> {
        self.mutate(|data| data.create_board(&name, &list_names)).await
    }

    async fn get_board(&self, board_id: &str) -> TaskboardResult<Board> {
        self.read(|data| data.get_board(board_id).cloned()).await
    }

    async fn get_lists(&self, board_id: &str) -> TaskboardResult<Vec<TaskList>> {
        self.read(|data| data.get_board(board_id).map(|b| b.lists.clone()))
            .await
    }

    async fn get_tasks(
        &self,
        list_id: &str,
        page: PageRequest,
    ) -> TaskboardResult<Paginated<Task>> {
        self.read(|data| data.get_tasks(list_id, page)).await
    }

    async fn create_task(&self, list_id: &str, task: NewTask) -> TaskboardResult<Task> {
        self.mutate(|data| data.create_task(list_id, task)).await
    }

    async fn delete_task(&self, task_id: &str) -> TaskboardResult<()> {
        self.mutate(|data| data.delete_task(task_id)).await
    }

    async fn update_task_status(
        &self,
        task_id: &str,
        new_list_id: &str,
        position: usize,
    ) -> TaskboardResult<()> {
        self.mutate(|data| data.update_task_status(task_id, new_list_id, position))
            .await
    }

    async fn update_task_order(
        &self,
        list_id: &str,
        task_ids: Vec<String>,
    ) -> TaskboardResult<()> {
        self.mutate(|data| data.update_task_order(list_id, &task_ids))
            .await
    }
}

#[async_trait]
impl NotificationStore for JsonFileStore {
    async fn list_notifications(&self) -> TaskboardResult<Vec<Notification>> {
        self.read(|data| Ok(data.notifications.clone())).await
    }

    async fn unread_count(&self) -> TaskboardResult<usize> {
        self.read(|data| Ok(data.unread_count())).await
    }

    async fn mark_read(&self, notification_id: &str) -> TaskboardResult<()> {
        self.mutate(|data| data.mark_read(notification_id)).await
    }

    async fn mark_all_read(&self) -> TaskboardResult<usize> {
        self.mutate(|data| Ok(data.mark_all_read())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_is_empty_workspace() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));

        assert!(!store.exists().await);
        assert!(store.list_boards().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_board_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");
        let store = JsonFileStore::new(&file_path);

        let board = store
            .create_board("Roadmap".to_string(), vec!["Todo".to_string(), "Done".to_string()])
            .await
            .unwrap();
        let todo = board.lists[0].id.clone();
        let task = store.create_task(&todo, NewTask::titled("Plan")).await.unwrap();
        assert!(store.exists().await);

        let reopened = JsonFileStore::new(&file_path);
        let loaded = reopened.get_board(&board.id).await.unwrap();
        assert_eq!(loaded.lists.len(), 2);
        assert_eq!(loaded.lists[0].tasks[0].id, task.id);
    }

    #[tokio::test]
    async fn test_status_update_persists() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let board = store
            .create_board("B".to_string(), vec!["A".to_string(), "Z".to_string()])
            .await
            .unwrap();
        let (a, z) = (board.lists[0].id.clone(), board.lists[1].id.clone());
        let task = store.create_task(&a, NewTask::titled("Move me")).await.unwrap();

        store.update_task_status(&task.id, &z, 0).await.unwrap();
        store.update_task_status(&task.id, &z, 0).await.unwrap();

        let lists = store.get_lists(&board.id).await.unwrap();
        assert!(lists[0].tasks.is_empty());
        assert_eq!(lists[1].tasks[0].status, z);
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_write() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));

        assert!(store.delete_task("missing").await.is_err());
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_unsupported_version_rejected() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");
        let mut envelope = JsonEnvelope::empty();
        envelope.version = 99;
        std::fs::write(&file_path, envelope.to_json_string().unwrap()).unwrap();

        let store = JsonFileStore::new(&file_path);
        assert!(matches!(
            store.list_boards().await,
            Err(TaskboardError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_envelope_loads() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");
        std::fs::write(&file_path, JsonEnvelope::empty().to_json_string().unwrap()).unwrap();

        let store = JsonFileStore::new(&file_path);
        assert_eq!(store.unread_count().await.unwrap(), 0);
    }
}
