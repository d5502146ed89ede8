pub mod config;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod result;

pub use config::AppConfig;
pub use error::TaskboardError;
pub use logging::{LogEntry, Loggable};
pub use pagination::{PageRequest, Paginated};
pub use result::TaskboardResult;
