//! Infrastructure layer: the snapshot-backed storage engine and its config.

pub mod config;
pub mod storage;


pub use config::StorageConfig;
pub use storage::{EngineState, FileStorage, StorageError, StorageResult};
