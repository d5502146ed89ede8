use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use taskboard_core::logging::push_bounded;
use taskboard_core::{LogEntry, Loggable, TaskboardError, TaskboardResult};

use crate::task::Task;
use crate::task_list::TaskList;

pub type BoardId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lists: Vec<TaskList>,
    #[serde(default)]
    pub activity: Vec<LogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight listing row for a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub list_count: usize,
    pub task_count: usize,
}

impl Board {
    pub fn new(id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            lists: Vec::new(),
            activity: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// New board with one empty list per name, ids freshly generated.
    pub fn with_list_names<S: AsRef<str>>(name: impl Into<String>, list_names: &[S]) -> Self {
        let mut board = Self::new(crate::new_id(), name);
        board.lists = list_names
            .iter()
            .map(|n| TaskList::new(crate::new_id(), board.id.clone(), n.as_ref()))
            .collect();
        board
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            list_count: self.lists.len(),
            task_count: self.task_count(),
        }
    }

    pub fn task_count(&self) -> usize {
        self.lists.iter().map(TaskList::len).sum()
    }

    pub fn find_list(&self, list_id: &str) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn find_list_mut(&mut self, list_id: &str) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    /// Locate a task as `(list index, task index)`.
    pub fn locate_task(&self, task_id: &str) -> Option<(usize, usize)> {
        self.lists
            .iter()
            .enumerate()
            .find_map(|(li, list)| list.position_of(task_id).map(|ti| (li, ti)))
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.locate_task(task_id)
            .map(|(li, ti)| &self.lists[li].tasks[ti])
    }

    pub fn replace_lists(&mut self, lists: Vec<TaskList>) {
        self.lists = lists;
        self.updated_at = Utc::now();
    }

    /// Check the structural invariants: unique list ids, every task in
    /// exactly one list, and each task's status naming its list.
    pub fn validate(&self) -> TaskboardResult<()> {
        let mut list_ids = HashSet::new();
        let mut task_ids = HashSet::new();
        for list in &self.lists {
            if !list_ids.insert(list.id.as_str()) {
                return Err(TaskboardError::Validation(format!(
                    "Duplicate list id {} on board {}",
                    list.id, self.id
                )));
            }
            if list.board_id != self.id {
                return Err(TaskboardError::Validation(format!(
                    "List {} belongs to board {}, not {}",
                    list.id, list.board_id, self.id
                )));
            }
            for task in &list.tasks {
                if !task_ids.insert(task.id.as_str()) {
                    return Err(TaskboardError::Validation(format!(
                        "Task {} appears more than once on board {}",
                        task.id, self.id
                    )));
                }
                if task.status != list.id {
                    return Err(TaskboardError::Validation(format!(
                        "Task {} has status {} but sits in list {}",
                        task.id, task.status, list.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Loggable for Board {
    fn add_log(&mut self, message: String) {
        push_bounded(&mut self.activity, LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.activity
    }
}
