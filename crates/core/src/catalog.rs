//! Reconstruction table: discriminator -> constructor.
//!
//! The storage engine never knows the concrete entity types. The application
//! fills a `ModelCatalog` at startup and hands it over; on reload every
//! record is routed through the constructor registered for its `__class__`.

use std::collections::HashMap;

use crate::entity::Entity;
use crate::error::DomainResult;
use crate::model::{Attributes, Model};
use crate::record::Record;

/// Builds a transient entity from its record.
pub type Reconstructor = fn(&Record) -> DomainResult<Box<dyn Entity>>;

#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    constructors: HashMap<String, Reconstructor>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `Model<A>` under `A::TYPE_NAME`.
    pub fn register<A: Attributes>(&mut self) -> &mut Self {
        self.register_with(A::TYPE_NAME, reconstruct::<A>)
    }

    /// Register an arbitrary constructor. A later registration for the same
    /// name wins.
    pub fn register_with(
        &mut self,
        type_name: impl Into<String>,
        constructor: Reconstructor,
    ) -> &mut Self {
        self.constructors.insert(type_name.into(), constructor);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<Reconstructor> {
        self.constructors.get(type_name).copied()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

fn reconstruct<A: Attributes>(record: &Record) -> DomainResult<Box<dyn Entity>> {
    Ok(Box::new(Model::<A>::from_record(record)?))
}
