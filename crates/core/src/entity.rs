//! Entity trait: identity + timestamps + record form.

use core::any::Any;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};
use crate::id::{EntityId, EntityKey};
use crate::record::{self, Record};
use crate::timestamp;

/// Identity and timestamp bookkeeping shared by every entity.
///
/// ## Invariants
///
/// - `id` is never empty and never changes after construction.
/// - `created_at` never changes after construction.
/// - `created_at <= updated_at`, and every `touch()` strictly increases
///   `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseModel {
    id: EntityId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BaseModel {
    /// Fresh identity: new random id, `created_at == updated_at == now`.
    pub fn new() -> Self {
        let now = timestamp::now();
        Self {
            id: EntityId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild from previously persisted parts.
    pub fn from_parts(
        id: EntityId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if updated_at < created_at {
            return Err(DomainError::validation(format!(
                "updated_at ({}) is earlier than created_at ({})",
                timestamp::format(&updated_at),
                timestamp::format(&created_at)
            )));
        }
        Ok(Self {
            id,
            created_at,
            updated_at,
        })
    }

    /// Read `id`, `created_at` and `updated_at` from a record.
    ///
    /// All three must be present as strings; an explicit null is rejected.
    pub fn from_record(record: &Record) -> DomainResult<Self> {
        let id = record::required_str(record, record::ID_KEY)?
            .parse::<EntityId>()
            .map_err(|e| DomainError::validation(format!("{}: {e}", record::ID_KEY)))?;
        let created_at = timestamp::parse(
            record::CREATED_AT_KEY,
            record::required_str(record, record::CREATED_AT_KEY)?,
        )?;
        let updated_at = timestamp::parse(
            record::UPDATED_AT_KEY,
            record::required_str(record, record::UPDATED_AT_KEY)?,
        )?;
        Self::from_parts(id, created_at, updated_at)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark the entity as updated now. Returns the new `updated_at`.
    pub fn touch(&mut self) -> DateTime<Utc> {
        let floor = self.updated_at + timestamp::tick();
        self.updated_at = timestamp::now().max(floor);
        self.updated_at
    }

    /// Write the identity fields into `record` in their text form.
    pub fn write_record(&self, record: &mut Record) {
        record.insert(
            record::ID_KEY.to_string(),
            JsonValue::String(self.id.to_string()),
        );
        record.insert(
            record::CREATED_AT_KEY.to_string(),
            JsonValue::String(timestamp::format(&self.created_at)),
        );
        record.insert(
            record::UPDATED_AT_KEY.to_string(),
            JsonValue::String(timestamp::format(&self.updated_at)),
        );
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Any entity the storage engine can hold.
///
/// Object safe: the registry stores `Box<dyn Entity>` regardless of the
/// concrete type. `Display` is the diagnostic form
/// `[<Type>] (<id>) {<attributes>}` and is not meant to be parsed.
pub trait Entity: Any + core::fmt::Debug + core::fmt::Display + Send + Sync {
    /// Concrete type name; also the record discriminator.
    fn type_name(&self) -> &'static str;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    /// Flat record form, including the discriminator.
    fn to_dict(&self) -> DomainResult<Record>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> &EntityId {
        self.base().id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.base().created_at()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.base().updated_at()
    }

    /// Registry key `"<Type>.<id>"`.
    fn key(&self) -> EntityKey {
        EntityKey::new(self.type_name(), self.id().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: JsonValue) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn fresh_base_has_equal_timestamps() {
        let base = BaseModel::new();
        assert_eq!(base.created_at(), base.updated_at());
        assert!(!base.id().as_str().is_empty());
    }

    #[test]
    fn touch_strictly_increases_updated_at() {
        let mut base = BaseModel::new();
        let before = base.updated_at();
        let first = base.touch();
        let second = base.touch();
        assert!(before < first);
        assert!(first < second);
        assert_eq!(base.created_at(), before);
    }

    #[test]
    fn record_round_trip_preserves_identity() {
        let base = BaseModel::new();
        let mut out = Record::new();
        base.write_record(&mut out);
        assert_eq!(BaseModel::from_record(&out).unwrap(), base);
    }

    #[test]
    fn explicit_null_identity_fields_are_rejected() {
        let ts = "2024-01-01T00:00:00.000000Z";
        for field in ["id", "created_at", "updated_at"] {
            let mut r = record(json!({"id": "345", "created_at": ts, "updated_at": ts}));
            r.insert(field.to_string(), JsonValue::Null);
            let err = BaseModel::from_record(&r).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{field}: {err}");
        }
    }

    #[test]
    fn updated_before_created_is_rejected() {
        let r = record(json!({
            "id": "345",
            "created_at": "2024-01-02T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
        }));
        assert!(matches!(
            BaseModel::from_record(&r),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn empty_id_is_rejected() {
        let ts = "2024-01-01T00:00:00Z";
        let r = record(json!({"id": "", "created_at": ts, "updated_at": ts}));
        assert!(matches!(
            BaseModel::from_record(&r),
            Err(DomainError::Validation(_))
        ));
    }
}
