pub mod provider;
pub mod session;
pub mod store;
pub mod traits;

pub use provider::{DataAccess, DataMode};
pub use session::{BoardSession, MoveSettlement, PendingMove, PendingWrite};
pub use store::*;
pub use traits::*;
