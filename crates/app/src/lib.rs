//! Process wiring: config, logging, catalog, storage, one reload.

use std::collections::BTreeMap;

use anyhow::Context;
use hbnb_core::Entity;
use hbnb_infra::{FileStorage, StorageConfig};
use hbnb_observability::LogFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            storage: StorageConfig::from_lookup(&lookup),
            log_format: LogFormat::from_lookup(&lookup),
        }
    }
}

/// A started process: the storage engine, reloaded from its snapshot.
#[derive(Debug)]
pub struct App {
    storage: FileStorage,
}

impl App {
    /// Start up once: install logging, build the catalog, open storage at
    /// the configured path and reload it.
    pub fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        hbnb_observability::init_with(config.log_format);

        let catalog = hbnb_models::catalog();
        tracing::debug!(types = ?catalog.type_names(), "model catalog ready");

        let mut storage = FileStorage::from_config(&config.storage, catalog);
        storage.reload().with_context(|| {
            format!("failed to reload snapshot {}", config.storage.path.display())
        })?;

        tracing::info!(
            path = %storage.path().display(),
            entities = storage.len(),
            "storage ready"
        );
        Ok(Self { storage })
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut FileStorage {
        &mut self.storage
    }

    pub fn into_storage(self) -> FileStorage {
        self.storage
    }

    /// Registered entities per type name.
    pub fn entity_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entity in self.storage.all().values() {
            *counts.entry(entity.type_name()).or_insert(0) += 1;
        }
        counts
    }
}
