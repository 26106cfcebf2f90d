//! Registration seam between entity construction and whoever owns entities.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::entity::Entity;
use crate::id::EntityKey;

/// Owner of live entities, keyed by `"<Type>.<id>"`.
///
/// Entity constructors take a `Registry` explicitly instead of reaching for
/// a process-wide global, so each caller (and each test) decides which
/// registry an entity lands in.
pub trait Registry {
    /// Take ownership of `entity` under its composite key.
    ///
    /// Re-registering a key replaces the previous entity.
    fn register(&mut self, entity: Box<dyn Entity>) -> &mut dyn Entity;
}

/// Plain in-memory registry.
///
/// No ordering guarantees on iteration.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    objects: HashMap<EntityKey, Box<dyn Entity>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Live view of every registered entity.
    pub fn all(&self) -> &HashMap<EntityKey, Box<dyn Entity>> {
        &self.objects
    }

    pub fn get(&self, key: &EntityKey) -> Option<&dyn Entity> {
        self.objects.get(key).map(|entity| entity.as_ref())
    }

    pub fn get_mut(&mut self, key: &EntityKey) -> Option<&mut dyn Entity> {
        self.objects.get_mut(key).map(|entity| entity.as_mut())
    }

    /// Typed lookup; `None` if absent or of another type.
    pub fn get_as<T: Entity>(&self, key: &EntityKey) -> Option<&T> {
        self.get(key)?.as_any().downcast_ref::<T>()
    }

    pub fn get_as_mut<T: Entity>(&mut self, key: &EntityKey) -> Option<&mut T> {
        self.get_mut(key)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &dyn Entity)> {
        self.objects.iter().map(|(key, entity)| (key, entity.as_ref()))
    }

    /// Drop every entity.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Registry for InMemoryRegistry {
    fn register(&mut self, entity: Box<dyn Entity>) -> &mut dyn Entity {
        let key = entity.key();
        let slot = match self.objects.entry(key) {
            Entry::Occupied(mut occupied) => {
                tracing::debug!(key = %occupied.key(), "replacing registered entity");
                occupied.insert(entity);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(key = %vacant.key(), "registered entity");
                vacant.insert(entity)
            }
        };
        slot.as_mut()
    }
}
