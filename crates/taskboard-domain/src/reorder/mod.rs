//! Drag-and-drop reordering for one board.
//!
//! [`apply_move`] is a pure transition from one ordered set of lists to the
//! next. It never mutates its input and yields at most one
//! [`PersistRequest`]. Every effective move carries a [`RollbackPatch`] so
//! the owner of the lists can undo an optimistic update when persistence
//! fails, and [`InFlightTracker`] lets the owner discard responses that a
//! newer move of the same task has superseded.

mod engine;
mod error;
mod in_flight;
mod movement;
mod rollback;

pub use engine::{apply_move, MoveOutcome, PersistRequest};
pub use error::ReorderError;
pub use in_flight::{InFlightTracker, RequestToken};
pub use movement::{Move, MoveKind};
pub use rollback::{rollback, RollbackPatch};
