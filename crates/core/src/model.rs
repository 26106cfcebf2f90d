//! Generic concrete entity: base bookkeeping + a typed attribute set.

use core::any::Any;
use core::fmt;
use core::ops::{Deref, DerefMut};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::entity::{BaseModel, Entity};
use crate::error::{DomainError, DomainResult};
use crate::record::{self, Record};
use crate::registry::Registry;

/// Declared field set of a concrete entity type.
///
/// Field zero values come from `Default`; implementors should put
/// `#[serde(default)]` on the struct so records missing a field still load.
/// Every field must serialize to a string, number, boolean or a sequence of
/// those, and no field may be named like a base field (`id`, `created_at`,
/// `updated_at`, `__class__`).
pub trait Attributes:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Concrete type name, used as the record discriminator.
    const TYPE_NAME: &'static str;
}

/// A concrete entity: `BaseModel` + declared attributes + instance extras.
///
/// Declared attributes are reachable directly through `Deref`:
///
/// ```
/// use hbnb_core::{Attributes, Entity, Model, Record};
///
/// #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// #[serde(default)]
/// struct Tag {
///     label: String,
/// }
///
/// impl Attributes for Tag {
///     const TYPE_NAME: &'static str = "Tag";
/// }
///
/// let mut tag = Model::<Tag>::with_overrides(Record::new()).unwrap();
/// tag.label = "blue".to_string();
///
/// let record = tag.to_dict().unwrap();
/// assert_eq!(record["label"], "blue");
/// assert_eq!(record["__class__"], "Tag");
/// ```
///
/// `to_dict` is a pure query and takes no arguments:
///
/// ```compile_fail
/// use hbnb_core::{Attributes, Entity, Model, Record};
///
/// #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// struct Tag {
///     label: String,
/// }
///
/// impl Attributes for Tag {
///     const TYPE_NAME: &'static str = "Tag";
/// }
///
/// let tag = Model::<Tag>::with_overrides(Record::new()).unwrap();
/// let _ = tag.to_dict(None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model<A> {
    base: BaseModel,
    attributes: A,
    extra: Record,
}

impl<A: Attributes> Model<A> {
    /// Fresh construction, then registration with `registry`.
    ///
    /// See [`Model::with_overrides`] for how `overrides` apply.
    pub fn create<'r, R>(registry: &'r mut R, overrides: Record) -> DomainResult<&'r mut Self>
    where
        R: Registry + ?Sized,
    {
        let model = Self::with_overrides(overrides)?;
        Self::register(registry, model)
    }

    /// Reconstruction from `record`, then registration with `registry`.
    pub fn restore<'r, R>(registry: &'r mut R, record: &Record) -> DomainResult<&'r mut Self>
    where
        R: Registry + ?Sized,
    {
        let model = Self::from_record(record)?;
        Self::register(registry, model)
    }

    /// Fresh construction without registration.
    ///
    /// Generates a new id and sets both timestamps to now, then applies
    /// `overrides`. `id`, `created_at` and `updated_at` may be overridden
    /// with concrete values but never with an explicit null. Unknown names
    /// become instance extras. A `__class__` entry is ignored.
    pub fn with_overrides(overrides: Record) -> DomainResult<Self> {
        for field in [record::ID_KEY, record::CREATED_AT_KEY, record::UPDATED_AT_KEY] {
            if matches!(overrides.get(field), Some(JsonValue::Null)) {
                return Err(DomainError::validation(format!(
                    "{field}: absent value is not allowed"
                )));
            }
        }

        let mut fresh = Record::new();
        BaseModel::new().write_record(&mut fresh);
        fresh.extend(
            overrides
                .into_iter()
                .filter(|(name, _)| name != record::CLASS_KEY),
        );
        Self::from_record(&fresh)
    }

    /// Reconstruction without registration.
    ///
    /// Keeps the persisted id and timestamps. Declared fields are decoded
    /// into the attribute set (missing ones take their default), every
    /// other non-base field lands in the extras, and the discriminator is
    /// ignored.
    pub fn from_record(record: &Record) -> DomainResult<Self> {
        let base = BaseModel::from_record(record)?;
        let declared = declared_fields::<A>()?;

        let mut fields = Record::new();
        let mut extra = Record::new();
        for (name, value) in record {
            if record::is_reserved(name) {
                continue;
            }
            if declared.contains_key(name) {
                fields.insert(name.clone(), value.clone());
            } else {
                record::ensure_portable(name, value)?;
                extra.insert(name.clone(), value.clone());
            }
        }

        let attributes = serde_json::from_value::<A>(JsonValue::Object(fields))
            .map_err(|e| DomainError::validation(format!("{}: {e}", A::TYPE_NAME)))?;

        Ok(Self {
            base,
            attributes,
            extra,
        })
    }

    fn register<'r, R>(registry: &'r mut R, model: Self) -> DomainResult<&'r mut Self>
    where
        R: Registry + ?Sized,
    {
        registry
            .register(Box::new(model))
            .as_any_mut()
            .downcast_mut::<Self>()
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "registry returned a different type for {}",
                    A::TYPE_NAME
                ))
            })
    }

    pub fn base(&self) -> &BaseModel {
        &self.base
    }

    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }

    /// Instance-level fields outside the declared attribute set.
    pub fn extras(&self) -> &Record {
        &self.extra
    }

    pub fn extra(&self, name: &str) -> Option<&JsonValue> {
        self.extra.get(name)
    }

    /// Attach an additional field to this instance.
    ///
    /// Rejects base and declared field names and non-portable values.
    pub fn set_extra(&mut self, name: impl Into<String>, value: JsonValue) -> DomainResult<()> {
        let name = name.into();
        if record::is_reserved(&name) || declared_fields::<A>()?.contains_key(&name) {
            return Err(DomainError::validation(format!(
                "{name}: already a field of {}",
                A::TYPE_NAME
            )));
        }
        record::ensure_portable(&name, &value)?;
        self.extra.insert(name, value);
        Ok(())
    }

    fn attribute_record(&self) -> DomainResult<Record> {
        match serde_json::to_value(&self.attributes)? {
            JsonValue::Object(map) => Ok(map),
            other => Err(DomainError::invariant(format!(
                "{} attributes serialize to {other}, expected a mapping",
                A::TYPE_NAME
            ))),
        }
    }
}

/// Field names of `A`, taken from its default value.
fn declared_fields<A: Attributes>() -> DomainResult<Record> {
    let declared = match serde_json::to_value(A::default())? {
        JsonValue::Object(map) => map,
        other => {
            return Err(DomainError::invariant(format!(
                "{} attributes serialize to {other}, expected a mapping",
                A::TYPE_NAME
            )));
        }
    };
    if let Some(clash) = declared.keys().find(|name| record::is_reserved(name)) {
        return Err(DomainError::invariant(format!(
            "{} declares base field '{clash}'",
            A::TYPE_NAME
        )));
    }
    Ok(declared)
}

impl<A: Attributes> Entity for Model<A> {
    fn type_name(&self) -> &'static str {
        A::TYPE_NAME
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn to_dict(&self) -> DomainResult<Record> {
        let attributes = self.attribute_record()?;
        // NaN and infinities serialize as null and would not load back.
        for (name, value) in &attributes {
            record::ensure_portable(name, value)?;
        }

        let mut record = self.extra.clone();
        record.extend(attributes);
        self.base.write_record(&mut record);
        record.insert(
            record::CLASS_KEY.to_string(),
            JsonValue::String(A::TYPE_NAME.to_string()),
        );
        Ok(record)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<A> Deref for Model<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.attributes
    }
}

impl<A> DerefMut for Model<A> {
    fn deref_mut(&mut self) -> &mut A {
        &mut self.attributes
    }
}

impl<A: Attributes> fmt::Display for Model<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) ", A::TYPE_NAME, self.base.id())?;

        let mut map = f.debug_map();
        map.entry(&record::ID_KEY, &self.base.id().as_str());
        map.entry(&record::CREATED_AT_KEY, &self.base.created_at());
        map.entry(&record::UPDATED_AT_KEY, &self.base.updated_at());
        match self.attribute_record() {
            Ok(attributes) => {
                for (name, value) in attributes.iter().chain(self.extra.iter()) {
                    map.entry(name, &format_args!("{value}"));
                }
            }
            Err(_) => {
                map.entry(&"attributes", &format_args!("<unavailable>"));
            }
        }
        map.finish()
    }
}
