use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use hbnb_core::{
    CLASS_KEY, Entity, EntityKey, InMemoryRegistry, ModelCatalog, Record, Registry,
};

use super::error::{StorageError, StorageResult};
use crate::config::StorageConfig;

/// Engine lifecycle. Saves don't change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Not reloaded yet, or the last reload failed.
    Uninitialized,
    /// A reload completed (with or without a snapshot file).
    Loaded,
}

/// Registry of live entities persisted as a single JSON snapshot file.
///
/// Entities register themselves on construction through the [`Registry`]
/// impl (e.g. `State::create(&mut storage, overrides)`); [`FileStorage::reload`]
/// repopulates the registry from disk through the [`ModelCatalog`] supplied
/// at construction.
///
/// Meant to be created once per process and reloaded once at startup.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    catalog: ModelCatalog,
    objects: InMemoryRegistry,
    state: EngineState,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>, catalog: ModelCatalog) -> Self {
        Self {
            path: path.into(),
            catalog,
            objects: InMemoryRegistry::new(),
            state: EngineState::Uninitialized,
        }
    }

    pub fn from_config(config: &StorageConfig, catalog: ModelCatalog) -> Self {
        Self::new(config.path.clone(), catalog)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == EngineState::Loaded
    }

    /// Live view of the registry (not a re-read of the snapshot).
    pub fn all(&self) -> &HashMap<EntityKey, Box<dyn Entity>> {
        self.objects.all()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, key: &EntityKey) -> Option<&dyn Entity> {
        self.objects.get(key)
    }

    pub fn get_as<T: Entity>(&self, key: &EntityKey) -> Option<&T> {
        self.objects.get_as(key)
    }

    pub fn get_as_mut<T: Entity>(&mut self, key: &EntityKey) -> Option<&mut T> {
        self.objects.get_as_mut(key)
    }

    /// Drop every registered entity. The snapshot file is untouched.
    pub fn reset(&mut self) {
        self.objects.clear();
    }

    /// Serialized registry: composite key -> record, sorted by key.
    pub fn snapshot(&self) -> StorageResult<BTreeMap<String, Record>> {
        self.objects
            .iter()
            .map(|(key, entity)| {
                let record = entity.to_dict().map_err(|source| StorageError::Entity {
                    key: key.to_string(),
                    source,
                })?;
                Ok((key.to_string(), record))
            })
            .collect()
    }

    /// Write the whole registry to the snapshot file, replacing it.
    ///
    /// Takes no arguments:
    ///
    /// ```compile_fail
    /// use hbnb_core::ModelCatalog;
    /// use hbnb_infra::FileStorage;
    ///
    /// let storage = FileStorage::new("file.json", ModelCatalog::new());
    /// storage.save(None).unwrap();
    /// ```
    pub fn save(&self) -> StorageResult<()> {
        let snapshot = self.snapshot()?;
        let bytes = serde_json::to_vec(&snapshot)?;
        write_replacing(&self.path, &bytes)?;
        tracing::info!(
            path = %self.path.display(),
            entities = snapshot.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Save one entity: bump its `updated_at`, then persist everything.
    ///
    /// Returns the new `updated_at`.
    pub fn save_entity(&mut self, key: &EntityKey) -> StorageResult<DateTime<Utc>> {
        let entity = self
            .objects
            .get_mut(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        let updated_at = entity.base_mut().touch();
        self.save()?;
        Ok(updated_at)
    }

    /// Replace the registry with the snapshot's contents.
    ///
    /// A missing file is not an error: the registry is left as it is. On
    /// any failure the registry is also left as it is and the engine is
    /// `Uninitialized`.
    pub fn reload(&mut self) -> StorageResult<()> {
        match self.read_snapshot() {
            Ok(Some(objects)) => {
                tracing::info!(
                    path = %self.path.display(),
                    entities = objects.len(),
                    "snapshot reloaded"
                );
                self.objects = objects;
                self.state = EngineState::Loaded;
                Ok(())
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no snapshot to reload");
                self.state = EngineState::Loaded;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "snapshot reload failed");
                self.state = EngineState::Uninitialized;
                Err(err)
            }
        }
    }

    fn read_snapshot(&self) -> StorageResult<Option<InMemoryRegistry>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let snapshot: serde_json::Map<String, JsonValue> = serde_json::from_slice(&bytes)?;
        let mut objects = InMemoryRegistry::new();
        for (key, value) in snapshot {
            let record = match value {
                JsonValue::Object(record) => record,
                other => {
                    return Err(StorageError::malformed(
                        &key,
                        format!("expected an object, got {other}"),
                    ));
                }
            };
            let entity = self.reconstruct(&key, &record)?;
            objects.register(entity);
        }
        Ok(Some(objects))
    }

    /// Dispatch `record` to the constructor named by its discriminator.
    fn reconstruct(&self, key: &str, record: &Record) -> StorageResult<Box<dyn Entity>> {
        let type_name = match record.get(CLASS_KEY) {
            Some(JsonValue::String(name)) => name,
            Some(_) => {
                return Err(StorageError::malformed(key, "discriminator is not a string"));
            }
            None => return Err(StorageError::malformed(key, "missing discriminator")),
        };

        let constructor = self
            .catalog
            .get(type_name)
            .ok_or_else(|| StorageError::UnknownType {
                key: key.to_string(),
                type_name: type_name.clone(),
            })?;

        let entity = constructor(record).map_err(|source| StorageError::Entity {
            key: key.to_string(),
            source,
        })?;

        let expected = entity.key().to_string();
        if expected != key {
            return Err(StorageError::malformed(
                key,
                format!("record belongs under '{expected}'"),
            ));
        }
        Ok(entity)
    }
}

impl Registry for FileStorage {
    fn register(&mut self, entity: Box<dyn Entity>) -> &mut dyn Entity {
        self.objects.register(entity)
    }
}

/// Write `bytes` to a sibling temp file, flush, then rename over `path`.
fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temporary_sibling(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    let result = written.and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_the_snapshot() {
        assert_eq!(
            temporary_sibling(Path::new("/data/file.json")),
            PathBuf::from("/data/file.json.tmp")
        );
        assert_eq!(
            temporary_sibling(Path::new("file.json")),
            PathBuf::from("file.json.tmp")
        );
    }

    #[test]
    fn new_engine_is_uninitialized_and_empty() {
        let storage = FileStorage::new("unused.json", ModelCatalog::new());
        assert_eq!(storage.state(), EngineState::Uninitialized);
        assert!(storage.is_empty());
    }
}
