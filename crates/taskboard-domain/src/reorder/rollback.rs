use serde::{Deserialize, Serialize};

use super::engine::apply_move;
use super::error::ReorderError;
use super::movement::Move;
use crate::task::TaskId;
use crate::task_list::{ListId, TaskList};

/// Where a task sat before a move, enough to put it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackPatch {
    pub task_id: TaskId,
    pub list_id: ListId,
    pub index: usize,
    pub status: ListId,
}

/// Return the patched task to its recorded list and index.
///
/// The task is looked up wherever it currently lives, so other tasks may
/// have moved in the meantime. The index is clamped to the list's current
/// bounds.
pub fn rollback(lists: &[TaskList], patch: &RollbackPatch) -> Result<Vec<TaskList>, ReorderError> {
    let (current_list, current_index) = lists
        .iter()
        .find_map(|l| l.position_of(&patch.task_id).map(|i| (l, i)))
        .ok_or_else(|| ReorderError::TaskNotFound(patch.task_id.clone()))?;

    let target = lists
        .iter()
        .find(|l| l.id == patch.list_id)
        .ok_or_else(|| ReorderError::ListNotFound(patch.list_id.clone()))?;

    let max = if target.id == current_list.id {
        target.len() - 1
    } else {
        target.len()
    };

    let mv = Move::between(
        current_list.id.clone(),
        current_index,
        patch.list_id.clone(),
        patch.index.min(max),
        patch.task_id.clone(),
    );
    let mut restored = apply_move(lists, &mv)?.lists;

    if let Some(task) = restored
        .iter_mut()
        .find(|l| l.id == patch.list_id)
        .and_then(|l| l.tasks.iter_mut().find(|t| t.id == patch.task_id))
    {
        task.status = patch.status.clone();
    }

    tracing::debug!(
        task_id = %patch.task_id,
        list_id = %patch.list_id,
        index = patch.index,
        "Rolled back task move"
    );
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn list(id: &str, task_ids: &[&str]) -> TaskList {
        TaskList::new(id, "B1", id)
            .with_tasks(task_ids.iter().map(|t| Task::new(*t, id, *t)).collect())
    }

    fn ids(list: &TaskList) -> Vec<&str> {
        list.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_rollback_transfer_restores_exactly() {
        let lists = vec![list("L1", &["T1", "T2", "T3"]), list("L2", &["T4"])];
        let outcome = apply_move(&lists, &Move::between("L1", 1, "L2", 0, "T2")).unwrap();

        let restored = rollback(&outcome.lists, &outcome.rollback.unwrap()).unwrap();

        assert_eq!(restored, lists);
    }

    #[test]
    fn test_rollback_reorder_restores_exactly() {
        let lists = vec![list("L1", &["T1", "T2", "T3"])];
        let outcome = apply_move(&lists, &Move::within("L1", 0, 2, "T1")).unwrap();

        let restored = rollback(&outcome.lists, &outcome.rollback.unwrap()).unwrap();

        assert_eq!(restored, lists);
    }

    #[test]
    fn test_rollback_after_unrelated_moves_clamps_index() {
        let lists = vec![list("L1", &["T1", "T2", "T3"]), list("L2", &[])];
        let first = apply_move(&lists, &Move::between("L1", 2, "L2", 0, "T3")).unwrap();
        let patch = first.rollback.clone().unwrap();

        // Another task leaves L1 before the failure is reported.
        let second = apply_move(&first.lists, &Move::between("L1", 0, "L2", 1, "T1")).unwrap();

        let restored = rollback(&second.lists, &patch).unwrap();

        assert_eq!(ids(&restored[0]), vec!["T2", "T3"]);
        assert_eq!(ids(&restored[1]), vec!["T1"]);
        assert_eq!(restored[0].tasks[1].status, "L1");
    }

    #[test]
    fn test_rollback_missing_task() {
        let lists = vec![list("L1", &["T1"])];
        let patch = RollbackPatch {
            task_id: "gone".to_string(),
            list_id: "L1".to_string(),
            index: 0,
            status: "L1".to_string(),
        };

        assert_eq!(
            rollback(&lists, &patch).unwrap_err(),
            ReorderError::TaskNotFound("gone".to_string())
        );
    }

    #[test]
    fn test_rollback_missing_list() {
        let lists = vec![list("L1", &["T1"])];
        let patch = RollbackPatch {
            task_id: "T1".to_string(),
            list_id: "L7".to_string(),
            index: 0,
            status: "L7".to_string(),
        };

        assert_eq!(
            rollback(&lists, &patch).unwrap_err(),
            ReorderError::ListNotFound("L7".to_string())
        );
    }
}
