use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::ReorderError;
use super::movement::{Move, MoveKind};
use super::rollback::RollbackPatch;
use crate::task::TaskId;
use crate::task_list::{ListId, TaskList};

/// Write the store must perform to make a move durable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PersistRequest {
    UpdateTaskStatus { task_id: TaskId, new_list_id: ListId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub lists: Vec<TaskList>,
    pub kind: MoveKind,
    pub persist: Option<PersistRequest>,
    /// Restores the moved task's previous location. `None` for no-ops.
    pub rollback: Option<RollbackPatch>,
}

impl MoveOutcome {
    fn unchanged(lists: &[TaskList]) -> Self {
        Self {
            lists: lists.to_vec(),
            kind: MoveKind::NoOp,
            persist: None,
            rollback: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.kind == MoveKind::NoOp
    }
}

/// Apply one drag-and-drop move to a board's lists.
///
/// The input is never mutated. Lists the move does not touch are copied
/// unchanged; on error the caller keeps its current state.
pub fn apply_move(lists: &[TaskList], mv: &Move) -> Result<MoveOutcome, ReorderError> {
    let kind = mv.kind();
    let dest_list_id = match (&mv.dest_list_id, kind) {
        (None, _) | (_, MoveKind::NoOp) => {
            tracing::debug!(task_id = %mv.task_id, "Move is a no-op");
            return Ok(MoveOutcome::unchanged(lists));
        }
        (Some(dest), _) => dest,
    };

    ensure_unique_ids(lists)?;

    let source_pos = list_position(lists, &mv.source_list_id)?;
    let source = &lists[source_pos];
    let moved = source
        .tasks
        .get(mv.source_index)
        .ok_or(ReorderError::SourceIndexOutOfRange {
            index: mv.source_index,
            len: source.len(),
        })?;
    if moved.id != mv.task_id {
        return Err(ReorderError::TaskMismatch {
            expected: mv.task_id.clone(),
            found: moved.id.clone(),
        });
    }

    let rollback_patch = RollbackPatch {
        task_id: moved.id.clone(),
        list_id: source.id.clone(),
        index: mv.source_index,
        status: moved.status.clone(),
    };

    let mut next = lists.to_vec();

    match kind {
        MoveKind::Reorder => {
            let max = source.len() - 1;
            if mv.dest_index > max {
                return Err(ReorderError::DestIndexOutOfRange {
                    index: mv.dest_index,
                    max,
                });
            }
            let list = &mut next[source_pos];
            let task = list.tasks.remove(mv.source_index);
            list.tasks.insert(mv.dest_index, task);

            tracing::debug!(
                task_id = %mv.task_id,
                list_id = %source.id,
                from = mv.source_index,
                to = mv.dest_index,
                "Reordered task within list"
            );

            Ok(MoveOutcome {
                lists: next,
                kind,
                persist: None,
                rollback: Some(rollback_patch),
            })
        }
        MoveKind::Transfer => {
            let dest_pos = list_position(lists, dest_list_id)?;
            let max = lists[dest_pos].len();
            if mv.dest_index > max {
                return Err(ReorderError::DestIndexOutOfRange {
                    index: mv.dest_index,
                    max,
                });
            }

            let mut task = next[source_pos].tasks.remove(mv.source_index);
            task.status = dest_list_id.clone();
            next[dest_pos].tasks.insert(mv.dest_index, task);

            tracing::debug!(
                task_id = %mv.task_id,
                from_list = %mv.source_list_id,
                to_list = %dest_list_id,
                to = mv.dest_index,
                "Transferred task between lists"
            );

            Ok(MoveOutcome {
                lists: next,
                kind,
                persist: Some(PersistRequest::UpdateTaskStatus {
                    task_id: mv.task_id.clone(),
                    new_list_id: dest_list_id.clone(),
                }),
                rollback: Some(rollback_patch),
            })
        }
        MoveKind::NoOp => Ok(MoveOutcome::unchanged(lists)),
    }
}

fn list_position(lists: &[TaskList], list_id: &str) -> Result<usize, ReorderError> {
    lists
        .iter()
        .position(|l| l.id == list_id)
        .ok_or_else(|| ReorderError::ListNotFound(list_id.to_string()))
}

fn ensure_unique_ids(lists: &[TaskList]) -> Result<(), ReorderError> {
    let mut seen = HashSet::with_capacity(lists.len());
    for list in lists {
        if !seen.insert(list.id.as_str()) {
            return Err(ReorderError::DuplicateList(list.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn task(id: &str, list: &str) -> Task {
        Task::new(id, list, format!("Task {}", id))
    }

    fn list(id: &str, task_ids: &[&str]) -> TaskList {
        TaskList::new(id, "B1", id).with_tasks(task_ids.iter().map(|t| task(t, id)).collect())
    }

    fn ids(list: &TaskList) -> Vec<&str> {
        list.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_transfer_to_empty_list() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &[])];
        let mv = Move::between("L1", 0, "L2", 0, "T1");

        let outcome = apply_move(&lists, &mv).unwrap();

        assert_eq!(outcome.kind, MoveKind::Transfer);
        assert_eq!(ids(&outcome.lists[0]), vec!["T2"]);
        assert_eq!(ids(&outcome.lists[1]), vec!["T1"]);
        assert_eq!(outcome.lists[1].tasks[0].status, "L2");
        assert_eq!(
            outcome.persist,
            Some(PersistRequest::UpdateTaskStatus {
                task_id: "T1".to_string(),
                new_list_id: "L2".to_string(),
            })
        );
    }

    #[test]
    fn test_drop_outside_any_list() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &[])];
        let mv = Move {
            source_list_id: "L1".to_string(),
            dest_list_id: None,
            source_index: 0,
            dest_index: 0,
            task_id: "T1".to_string(),
        };

        let outcome = apply_move(&lists, &mv).unwrap();

        assert_eq!(outcome.lists, lists);
        assert!(outcome.persist.is_none());
        assert!(outcome.rollback.is_none());
        assert!(outcome.is_noop());
    }

    #[test]
    fn test_reorder_to_end() {
        let lists = vec![list("L1", &["T1", "T2", "T3"])];
        let mv = Move::within("L1", 0, 2, "T1");

        let outcome = apply_move(&lists, &mv).unwrap();

        assert_eq!(outcome.kind, MoveKind::Reorder);
        assert_eq!(ids(&outcome.lists[0]), vec!["T2", "T3", "T1"]);
        assert!(outcome.persist.is_none());
    }

    #[test]
    fn test_reorder_towards_front_keeps_relative_order() {
        let lists = vec![list("L1", &["T1", "T2", "T3", "T4"])];
        let mv = Move::within("L1", 3, 1, "T4");

        let outcome = apply_move(&lists, &mv).unwrap();

        assert_eq!(ids(&outcome.lists[0]), vec!["T1", "T4", "T2", "T3"]);
        assert_eq!(outcome.lists[0].len(), 4);
        assert_eq!(outcome.lists[0].tasks[1].status, "L1");
    }

    #[test]
    fn test_identity_move_is_idempotent() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &["T3"])];
        let mv = Move::within("L1", 1, 1, "T2");

        let mut current = lists.clone();
        for _ in 0..5 {
            let outcome = apply_move(&current, &mv).unwrap();
            assert!(outcome.persist.is_none());
            current = outcome.lists;
        }
        assert_eq!(current, lists);
    }

    #[test]
    fn test_identity_move_short_circuits_validation() {
        let lists = vec![list("L1", &["T1"])];
        let mv = Move::within("L1", 9, 9, "T9");

        let outcome = apply_move(&lists, &mv).unwrap();
        assert_eq!(outcome.lists, lists);
    }

    #[test]
    fn test_round_trip_restores_sequences() {
        let lists = vec![list("A", &["T1", "T2", "T3"]), list("B", &["T4"])];

        let there = apply_move(&lists, &Move::between("A", 1, "B", 1, "T2")).unwrap();
        assert_eq!(ids(&there.lists[0]), vec!["T1", "T3"]);
        assert_eq!(ids(&there.lists[1]), vec!["T4", "T2"]);

        let back = apply_move(&there.lists, &Move::between("B", 1, "A", 1, "T2")).unwrap();
        assert_eq!(back.lists, lists);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &[])];
        let before = lists.clone();

        let _ = apply_move(&lists, &Move::between("L1", 0, "L2", 0, "T1")).unwrap();

        assert_eq!(lists, before);
    }

    #[test]
    fn test_untouched_lists_are_equal() {
        let lists = vec![list("L1", &["T1"]), list("L2", &["T2"]), list("L3", &["T3"])];

        let outcome = apply_move(&lists, &Move::between("L1", 0, "L3", 1, "T1")).unwrap();

        assert_eq!(outcome.lists[1], lists[1]);
        assert_eq!(ids(&outcome.lists[2]), vec!["T3", "T1"]);
    }

    #[test]
    fn test_transfer_can_append() {
        let lists = vec![list("L1", &["T1"]), list("L2", &["T2", "T3"])];

        let outcome = apply_move(&lists, &Move::between("L1", 0, "L2", 2, "T1")).unwrap();
        assert_eq!(ids(&outcome.lists[1]), vec!["T2", "T3", "T1"]);
    }

    #[test]
    fn test_rejects_unknown_lists() {
        let lists = vec![list("L1", &["T1"])];

        let err = apply_move(&lists, &Move::between("L9", 0, "L1", 0, "T1")).unwrap_err();
        assert_eq!(err, ReorderError::ListNotFound("L9".to_string()));

        let err = apply_move(&lists, &Move::between("L1", 0, "L9", 0, "T1")).unwrap_err();
        assert_eq!(err, ReorderError::ListNotFound("L9".to_string()));
    }

    #[test]
    fn test_rejects_bad_indices() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &["T3"])];

        let err = apply_move(&lists, &Move::within("L1", 2, 0, "T1")).unwrap_err();
        assert_eq!(err, ReorderError::SourceIndexOutOfRange { index: 2, len: 2 });

        let err = apply_move(&lists, &Move::within("L1", 0, 2, "T1")).unwrap_err();
        assert_eq!(err, ReorderError::DestIndexOutOfRange { index: 2, max: 1 });

        let err = apply_move(&lists, &Move::between("L1", 0, "L2", 2, "T1")).unwrap_err();
        assert_eq!(err, ReorderError::DestIndexOutOfRange { index: 2, max: 1 });
    }

    #[test]
    fn test_rejects_task_mismatch() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &[])];

        let err = apply_move(&lists, &Move::between("L1", 0, "L2", 0, "T2")).unwrap_err();
        assert_eq!(
            err,
            ReorderError::TaskMismatch {
                expected: "T2".to_string(),
                found: "T1".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_list_ids() {
        let lists = vec![list("L1", &["T1"]), list("L1", &[])];

        let err = apply_move(&lists, &Move::between("L1", 0, "L2", 0, "T1")).unwrap_err();
        assert_eq!(err, ReorderError::DuplicateList("L1".to_string()));
    }

    #[test]
    fn test_rollback_patch_records_origin() {
        let lists = vec![list("L1", &["T1", "T2"]), list("L2", &[])];

        let outcome = apply_move(&lists, &Move::between("L1", 1, "L2", 0, "T2")).unwrap();
        let patch = outcome.rollback.unwrap();

        assert_eq!(patch.task_id, "T2");
        assert_eq!(patch.list_id, "L1");
        assert_eq!(patch.index, 1);
        assert_eq!(patch.status, "L1");
    }

    #[test]
    fn test_persist_request_wire_shape() {
        let request = PersistRequest::UpdateTaskStatus {
            task_id: "T1".to_string(),
            new_list_id: "L2".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "updateTaskStatus", "taskId": "T1", "newListId": "L2"})
        );
    }
}
