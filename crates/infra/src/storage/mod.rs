//! Storage engine: the live entity registry plus its on-disk snapshot.
//!
//! ## Snapshot format
//!
//! One JSON object mapping `"<Type>.<id>"` to the entity's flat record
//! (`Entity::to_dict`). The whole file is rewritten on every save.
//!
//! ## Concurrency
//!
//! Single process, single writer. Each save replaces the file in one rename,
//! so readers never see a half-written snapshot, but two processes saving
//! concurrently lose each other's updates (last rename wins).

pub mod error;
pub mod file;

pub use error::{StorageError, StorageResult};
pub use file::{EngineState, FileStorage};
