use serde::{Deserialize, Serialize};

use crate::task::TaskId;
use crate::task_list::ListId;

/// The result of one drag gesture, emitted at drop time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub source_list_id: ListId,
    /// `None` when the task was dropped outside any list.
    pub dest_list_id: Option<ListId>,
    pub source_index: usize,
    pub dest_index: usize,
    pub task_id: TaskId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Dropped nowhere, or back onto its own slot.
    NoOp,
    /// Same list, new position.
    Reorder,
    /// Different list; the task's status changes.
    Transfer,
}

impl Move {
    pub fn within(
        list_id: impl Into<ListId>,
        source_index: usize,
        dest_index: usize,
        task_id: impl Into<TaskId>,
    ) -> Self {
        let list_id = list_id.into();
        Self {
            source_list_id: list_id.clone(),
            dest_list_id: Some(list_id),
            source_index,
            dest_index,
            task_id: task_id.into(),
        }
    }

    pub fn between(
        source_list_id: impl Into<ListId>,
        source_index: usize,
        dest_list_id: impl Into<ListId>,
        dest_index: usize,
        task_id: impl Into<TaskId>,
    ) -> Self {
        Self {
            source_list_id: source_list_id.into(),
            dest_list_id: Some(dest_list_id.into()),
            source_index,
            dest_index,
            task_id: task_id.into(),
        }
    }

    pub fn kind(&self) -> MoveKind {
        match &self.dest_list_id {
            None => MoveKind::NoOp,
            Some(dest) if *dest == self.source_list_id => {
                if self.source_index == self.dest_index {
                    MoveKind::NoOp
                } else {
                    MoveKind::Reorder
                }
            }
            Some(_) => MoveKind::Transfer,
        }
    }
}
