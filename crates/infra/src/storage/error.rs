use hbnb_core::DomainError;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage engine error.
///
/// Infrastructure failures (snapshot format, IO, type dispatch) as opposed
/// to entity-level `DomainError`s, which are wrapped with the record key.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Snapshot could not be encoded, or the file is not a JSON object.
    #[error("snapshot (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A snapshot entry parsed as JSON but is not a usable record.
    #[error("malformed snapshot record '{key}': {reason}")]
    MalformedRecord { key: String, reason: String },

    /// No constructor registered for a record's discriminator.
    #[error("unknown entity type '{type_name}' in record '{key}'")]
    UnknownType { key: String, type_name: String },

    /// An entity failed to reconstruct or serialize.
    #[error("entity '{key}' rejected: {source}")]
    Entity {
        key: String,
        #[source]
        source: DomainError,
    },

    #[error("entity not registered: {0}")]
    NotFound(String),

    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this is (or wraps) a `DomainError::Validation`.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Entity {
                source: DomainError::Validation(_),
                ..
            }
        )
    }
}
