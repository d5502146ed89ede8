//! In-memory workspace shared by every store backend.
//!
//! Backends differ only in where this data lives between calls; the
//! semantics of each store operation are implemented once here.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use taskboard_core::{PageRequest, Paginated, TaskboardError, TaskboardResult};
use taskboard_domain::{
    Board, BoardSummary, NewTask, Notification, Task, TaskList, TaskPriority,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceData {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl WorkspaceData {
    pub fn list_boards(&self) -> Vec<BoardSummary> {
        self.boards.iter().map(Board::summary).collect()
    }

    pub fn create_board(&mut self, name: &str, list_names: &[String]) -> TaskboardResult<Board> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskboardError::Validation(
                "Board name cannot be empty".to_string(),
            ));
        }
        let list_names: Vec<&str> = list_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();
        if list_names.is_empty() {
            return Err(TaskboardError::Validation(
                "A board needs at least one list".to_string(),
            ));
        }

        let board = Board::with_list_names(name, &list_names);
        self.boards.push(board.clone());
        tracing::info!("Created board {} with {} lists", board.id, list_names.len());
        Ok(board)
    }

    pub fn get_board(&self, board_id: &str) -> TaskboardResult<&Board> {
        self.boards
            .iter()
            .find(|b| b.id == board_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("Board {}", board_id)))
    }

    pub fn get_tasks(&self, list_id: &str, page: PageRequest) -> TaskboardResult<Paginated<Task>> {
        let (bi, li) = self.locate_list(list_id)?;
        Ok(Paginated::from_slice(&self.boards[bi].lists[li].tasks, page))
    }

    pub fn create_task(&mut self, list_id: &str, new: NewTask) -> TaskboardResult<Task> {
        if new.title.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }
        let (bi, li) = self.locate_list(list_id)?;
        let task = Task::from_new(list_id, new);
        let board = &mut self.boards[bi];
        board.lists[li].push_task(task.clone());
        board.updated_at = Utc::now();
        Ok(task)
    }

    pub fn delete_task(&mut self, task_id: &str) -> TaskboardResult<()> {
        let (bi, li, ti) = self.locate_task(task_id)?;
        let board = &mut self.boards[bi];
        board.lists[li].tasks.remove(ti);
        board.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_task_status(
        &mut self,
        task_id: &str,
        new_list_id: &str,
        position: usize,
    ) -> TaskboardResult<()> {
        let (bi, li, ti) = self.locate_task(task_id)?;
        let (dest_bi, dest_li) = self.locate_list(new_list_id)?;
        if dest_bi != bi {
            return Err(TaskboardError::Validation(format!(
                "List {} is on a different board than task {}",
                new_list_id, task_id
            )));
        }

        let board = &mut self.boards[bi];
        if li == dest_li {
            let target = position.min(board.lists[li].len() - 1);
            if target == ti {
                tracing::debug!("Task {} already in {} at {}", task_id, new_list_id, ti);
                return Ok(());
            }
            let task = board.lists[li].tasks.remove(ti);
            board.lists[li].tasks.insert(target, task);
        } else {
            let mut task = board.lists[li].tasks.remove(ti);
            task.update_status(new_list_id);
            let dest = &mut board.lists[dest_li];
            let target = position.min(dest.len());
            dest.tasks.insert(target, task);
        }
        board.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_task_order(&mut self, list_id: &str, task_ids: &[String]) -> TaskboardResult<()> {
        let (bi, li) = self.locate_list(list_id)?;
        let list = &mut self.boards[bi].lists[li];

        let current: HashSet<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
        let requested: HashSet<&str> = task_ids.iter().map(String::as_str).collect();
        if task_ids.len() != list.len() || current != requested {
            return Err(TaskboardError::Validation(format!(
                "Order for list {} must name each of its {} tasks exactly once",
                list_id,
                list.len()
            )));
        }

        let mut remaining = std::mem::take(&mut list.tasks);
        for id in task_ids {
            if let Some(pos) = remaining.iter().position(|t| t.id == *id) {
                list.tasks.push(remaining.swap_remove(pos));
            }
        }
        self.boards[bi].updated_at = Utc::now();
        Ok(())
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, notification_id: &str) -> TaskboardResult<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("Notification {}", notification_id)))?;
        notification.mark_read();
        Ok(())
    }

    pub fn mark_all_read(&mut self) -> usize {
        self.notifications
            .iter_mut()
            .map(Notification::mark_read)
            .filter(|changed| *changed)
            .count()
    }

    fn locate_list(&self, list_id: &str) -> TaskboardResult<(usize, usize)> {
        self.boards
            .iter()
            .enumerate()
            .find_map(|(bi, b)| b.lists.iter().position(|l| l.id == list_id).map(|li| (bi, li)))
            .ok_or_else(|| TaskboardError::NotFound(format!("List {}", list_id)))
    }

    fn locate_task(&self, task_id: &str) -> TaskboardResult<(usize, usize, usize)> {
        self.boards
            .iter()
            .enumerate()
            .find_map(|(bi, b)| b.locate_task(task_id).map(|(li, ti)| (bi, li, ti)))
            .ok_or_else(|| TaskboardError::NotFound(format!("Task {}", task_id)))
    }

    /// Sample workspace served when no real data source is configured.
    pub fn demo() -> Self {
        let now = Utc::now();
        let mut board = Board::new("demo-board", "Product Launch");
        board.description = Some("Sample board shown in demo mode".to_string());

        let mut todo = TaskList::new("todo", board.id.clone(), "To Do");
        let mut doing = TaskList::new("in-progress", board.id.clone(), "In Progress");
        let mut done = TaskList::new("done", board.id.clone(), "Done");

        let mut checklist = Task::new("task-1", "todo", "Draft launch checklist");
        checklist.priority = TaskPriority::High;
        checklist.due_date = Some(now + Duration::days(3));
        checklist.add_label("planning");
        todo.push_task(checklist);

        let mut copy = Task::new("task-2", "todo", "Write release notes");
        copy.assignee = Some("jordan".to_string());
        todo.push_task(copy);

        let mut qa = Task::new("task-3", "in-progress", "Regression pass on checkout");
        qa.priority = TaskPriority::Critical;
        qa.assignee = Some("sam".to_string());
        qa.add_label("qa");
        qa.add_comment("sam", "Payment flow still flaky on retry");
        doing.push_task(qa);

        let mut kickoff = Task::new("task-4", "done", "Kickoff meeting");
        kickoff.priority = TaskPriority::Low;
        done.push_task(kickoff);

        board.lists = vec![todo, doing, done];

        let mut welcome = Notification::new("Welcome", "You are exploring the demo board");
        welcome.id = "notif-1".to_string();
        let mut assigned = Notification::new(
            "Assigned to you",
            "Regression pass on checkout was assigned to you",
        );
        assigned.id = "notif-2".to_string();

        Self {
            boards: vec![board],
            notifications: vec![welcome, assigned],
        }
    }
}
