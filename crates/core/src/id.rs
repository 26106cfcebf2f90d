//! Entity identifiers and registry keys.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an entity.
///
/// Fresh entities get the textual form of a random UUIDv4. Reconstructed
/// entities keep whatever non-empty string they were persisted with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::invalid_id("EntityId: empty"));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(DomainError::invalid_id("EntityId: empty"));
        }
        Ok(Self(value))
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

/// Registry key of an entity: `"<TypeName>.<id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    type_name: String,
    id: EntityId,
}

impl EntityKey {
    pub fn new(type_name: impl Into<String>, id: EntityId) -> Self {
        Self {
            type_name: type_name.into(),
            id,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
}

impl core::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.type_name, self.id)
    }
}

impl FromStr for EntityKey {
    type Err = DomainError;

    /// Type names never contain `.`, so the split happens at the first one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_name, id) = s
            .split_once('.')
            .ok_or_else(|| DomainError::invalid_id(format!("EntityKey: missing '.' in '{s}'")))?;
        if type_name.is_empty() {
            return Err(DomainError::invalid_id(format!(
                "EntityKey: empty type name in '{s}'"
            )));
        }
        Ok(Self::new(type_name, id.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_uuid_v4_text() {
        let id = EntityId::new();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!("".parse::<EntityId>(), Err(DomainError::InvalidId(_))));
        assert!(serde_json::from_str::<EntityId>("\"\"").is_err());
    }

    #[test]
    fn key_renders_type_dot_id() {
        let key = EntityKey::new("State", "345".parse().unwrap());
        assert_eq!(key.to_string(), "State.345");
    }

    #[test]
    fn key_parses_at_first_dot() {
        let key: EntityKey = "Place.a.b".parse().unwrap();
        assert_eq!(key.type_name(), "Place");
        assert_eq!(key.id().as_str(), "a.b");
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!("State".parse::<EntityKey>().is_err());
        assert!(".123".parse::<EntityKey>().is_err());
        assert!("State.".parse::<EntityKey>().is_err());
    }
}
