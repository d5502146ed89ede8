pub mod board;
pub mod notification;
pub mod reorder;
pub mod task;
pub mod task_list;

pub use board::{Board, BoardId, BoardSummary};
pub use notification::{Notification, NotificationId};
pub use reorder::{
    apply_move, rollback, InFlightTracker, Move, MoveKind, MoveOutcome, PersistRequest,
    ReorderError, RequestToken, RollbackPatch,
};
pub use task::{Attachment, Comment, NewTask, Task, TaskId, TaskPriority};
pub use task_list::{ListId, TaskList};

/// Fresh identifier for a newly created entity.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
