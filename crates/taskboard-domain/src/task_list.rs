use serde::{Deserialize, Serialize};

use crate::board::BoardId;
use crate::task::Task;

pub type ListId = String;

/// A board column. Doubles as the status category of the tasks it holds;
/// `tasks` order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub board_id: BoardId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: impl Into<ListId>, board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn task_ids(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }

    /// Append a task, re-parenting it to this list.
    pub fn push_task(&mut self, mut task: Task) {
        if task.status != self.id {
            task.update_status(self.id.clone());
        }
        self.tasks.push(task);
    }

    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let pos = self.position_of(task_id)?;
        Some(self.tasks.remove(pos))
    }
}
