pub mod atomic_writer;
pub mod demo_store;
pub mod json_file_store;
pub mod workspace;

pub use atomic_writer::AtomicWriter;
pub use demo_store::DemoStore;
pub use json_file_store::{JsonEnvelope, JsonFileStore};
pub use workspace::WorkspaceData;
