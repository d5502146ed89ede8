use taskboard_core::TaskboardError;
use thiserror::Error;

use crate::task_list::ListId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Duplicate list id: {0}")]
    DuplicateList(ListId),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Source index {index} out of range for list of {len} tasks")]
    SourceIndexOutOfRange { index: usize, len: usize },

    #[error("Destination index {index} out of range (max {max})")]
    DestIndexOutOfRange { index: usize, max: usize },

    #[error("Expected task {expected} at source index, found {found}")]
    TaskMismatch { expected: String, found: String },
}

impl From<ReorderError> for TaskboardError {
    fn from(err: ReorderError) -> Self {
        match err {
            ReorderError::ListNotFound(_) | ReorderError::TaskNotFound(_) => {
                TaskboardError::NotFound(err.to_string())
            }
            _ => TaskboardError::Validation(err.to_string()),
        }
    }
}
