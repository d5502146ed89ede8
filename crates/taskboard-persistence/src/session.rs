//! Optimistic editing of one board.
//!
//! A [`BoardSession`] is the single writer of a board's local lists. A move
//! is committed locally before the store hears about it; the store call is
//! dispatched separately and its result settled back into the session,
//! which either keeps the optimistic state, ignores a superseded response,
//! or rolls the task back to where it was.

use std::sync::Arc;
use taskboard_core::{Loggable, TaskboardError, TaskboardResult};
use taskboard_domain::{
    apply_move, rollback, Board, InFlightTracker, Move, MoveKind, NewTask, PersistRequest,
    RequestToken, RollbackPatch, Task, TaskId, TaskList,
};

use crate::traits::TaskStore;

/// Store call that makes a committed move durable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    Status {
        task_id: TaskId,
        new_list_id: String,
        position: usize,
    },
    Order {
        list_id: String,
        task_ids: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct PendingMove {
    pub write: PendingWrite,
    pub rollback: RollbackPatch,
    token: RequestToken<TaskId>,
}

impl PendingMove {
    pub fn task_id(&self) -> &str {
        &self.token.key
    }
}

#[derive(Debug)]
pub enum MoveSettlement {
    /// Nothing needed persisting (no-op, or a reorder with order
    /// persistence disabled).
    LocalOnly,
    Confirmed,
    /// A newer move of the same task was issued; this result was ignored.
    Superseded,
    /// The store rejected the write and the task was moved back.
    RolledBack { error: TaskboardError },
    /// The store rejected the write and the task could not be moved back;
    /// local state stays divergent until reload.
    Diverged { error: TaskboardError },
}

impl MoveSettlement {
    /// Error to surface to the user, if any.
    pub fn error(&self) -> Option<&TaskboardError> {
        match self {
            Self::RolledBack { error } | Self::Diverged { error } => Some(error),
            _ => None,
        }
    }
}

pub struct BoardSession {
    board: Board,
    store: Arc<dyn TaskStore>,
    in_flight: InFlightTracker<TaskId>,
    persist_reorder: bool,
}

impl BoardSession {
    /// Cold-start a session from the store's copy of `board_id`.
    pub async fn open(store: Arc<dyn TaskStore>, board_id: &str) -> TaskboardResult<Self> {
        let board = store.get_board(board_id).await?;
        board.validate()?;
        tracing::debug!(
            "Opened board {} with {} lists and {} tasks",
            board.id,
            board.lists.len(),
            board.task_count()
        );
        Ok(Self {
            board,
            store,
            in_flight: InFlightTracker::new(),
            persist_reorder: false,
        })
    }

    pub fn with_persist_reorder(mut self, persist_reorder: bool) -> Self {
        self.persist_reorder = persist_reorder;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.board.lists
    }

    pub fn store(&self) -> Arc<dyn TaskStore> {
        Arc::clone(&self.store)
    }

    /// True while a write for `task_id` is outstanding. Callers should
    /// hold further drags of that task until it settles.
    pub fn is_pending(&self, task_id: &str) -> bool {
        self.in_flight.is_pending(&task_id.to_string())
    }

    /// Apply `mv` locally and return the write that still has to reach the
    /// store. Invalid moves leave the session untouched.
    pub fn begin_move(&mut self, mv: &Move) -> TaskboardResult<Option<PendingMove>> {
        let outcome = apply_move(&self.board.lists, mv)?;
        let Some(rollback) = outcome.rollback.clone() else {
            return Ok(None);
        };

        let write = match (&outcome.persist, outcome.kind) {
            (
                Some(PersistRequest::UpdateTaskStatus {
                    task_id,
                    new_list_id,
                }),
                _,
            ) => Some(PendingWrite::Status {
                task_id: task_id.clone(),
                new_list_id: new_list_id.clone(),
                position: mv.dest_index,
            }),
            (None, MoveKind::Reorder) if self.persist_reorder => outcome
                .lists
                .iter()
                .find(|l| l.id == mv.source_list_id)
                .map(|l| PendingWrite::Order {
                    list_id: l.id.clone(),
                    task_ids: l.task_ids(),
                }),
            _ => None,
        };

        self.board.replace_lists(outcome.lists);
        self.board.add_log(describe_move(mv, outcome.kind));

        // Only a move that issues its own write supersedes an older one;
        // a local-only move leaves any outstanding write current.
        let Some(write) = write else {
            return Ok(None);
        };
        let token = self.in_flight.begin(mv.task_id.clone());
        Ok(Some(PendingMove {
            write,
            rollback,
            token,
        }))
    }

    /// Perform the store call for `pending`. Independent of the session so
    /// it can run on a spawned task.
    pub async fn dispatch(store: &dyn TaskStore, pending: &PendingMove) -> TaskboardResult<()> {
        match &pending.write {
            PendingWrite::Status {
                task_id,
                new_list_id,
                position,
            } => {
                store
                    .update_task_status(task_id, new_list_id, *position)
                    .await
            }
            PendingWrite::Order { list_id, task_ids } => {
                store.update_task_order(list_id, task_ids.clone()).await
            }
        }
    }

    /// Fold the store's answer for `pending` back into local state.
    pub fn settle(&mut self, pending: PendingMove, result: TaskboardResult<()>) -> MoveSettlement {
        if !self.in_flight.settle(&pending.token) {
            tracing::debug!(
                "Ignoring superseded result for task {}",
                pending.task_id()
            );
            return MoveSettlement::Superseded;
        }

        let error = match result {
            Ok(()) => return MoveSettlement::Confirmed,
            Err(error) => error,
        };

        match rollback(&self.board.lists, &pending.rollback) {
            Ok(lists) => {
                tracing::warn!(
                    "Persisting move of task {} failed, rolled back: {}",
                    pending.task_id(),
                    error
                );
                self.board.replace_lists(lists);
                self.board.add_log(format!(
                    "Reverted move of task {} after save failed",
                    pending.task_id()
                ));
                MoveSettlement::RolledBack { error }
            }
            Err(rollback_error) => {
                tracing::warn!(
                    "Persisting move of task {} failed ({}) and rollback failed: {}",
                    pending.task_id(),
                    error,
                    rollback_error
                );
                MoveSettlement::Diverged { error }
            }
        }
    }

    /// Apply, persist and settle one move.
    pub async fn move_task(&mut self, mv: &Move) -> TaskboardResult<MoveSettlement> {
        let Some(pending) = self.begin_move(mv)? else {
            return Ok(MoveSettlement::LocalOnly);
        };
        let result = Self::dispatch(self.store.as_ref(), &pending).await;
        Ok(self.settle(pending, result))
    }

    /// Create a task through the store and append it locally.
    pub async fn add_task(&mut self, list_id: &str, new: NewTask) -> TaskboardResult<Task> {
        if self.board.find_list(list_id).is_none() {
            return Err(TaskboardError::NotFound(format!("List {}", list_id)));
        }
        let task = self.store.create_task(list_id, new).await?;
        if let Some(list) = self.board.find_list_mut(list_id) {
            list.push_task(task.clone());
        }
        self.board.add_log(format!("Created task {} in {}", task.id, list_id));
        Ok(task)
    }

    /// Delete a task through the store, then drop it locally.
    pub async fn remove_task(&mut self, task_id: &str) -> TaskboardResult<()> {
        self.store.delete_task(task_id).await?;
        for list in &mut self.board.lists {
            if list.remove_task(task_id).is_some() {
                break;
            }
        }
        self.board.add_log(format!("Deleted task {}", task_id));
        Ok(())
    }

    /// Replace local lists with the store's copy, discarding divergence.
    pub async fn reload(&mut self) -> TaskboardResult<()> {
        let lists = self.store.get_lists(&self.board.id).await?;
        self.board.replace_lists(lists);
        Ok(())
    }
}

fn describe_move(mv: &Move, kind: MoveKind) -> String {
    match (kind, &mv.dest_list_id) {
        (MoveKind::Transfer, Some(dest)) => format!(
            "Moved task {} from {} to {} at {}",
            mv.task_id, mv.source_list_id, dest, mv.dest_index
        ),
        _ => format!(
            "Reordered task {} in {} from {} to {}",
            mv.task_id, mv.source_list_id, mv.source_index, mv.dest_index
        ),
    }
}
