//! `hbnb-core`: entity foundation building blocks.
//!
//! Identity, timestamps, the canonical record form of an entity, and the
//! seams (`Registry`, `ModelCatalog`) the storage engine plugs into. This
//! crate does no IO.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod id;
pub mod model;
pub mod record;
pub mod registry;
pub mod timestamp;

pub use catalog::{ModelCatalog, Reconstructor};
pub use entity::{BaseModel, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, EntityKey};
pub use model::{Attributes, Model};
pub use record::{CLASS_KEY, Record};
pub use registry::{InMemoryRegistry, Registry};
