//! Amenity entity.

use hbnb_core::{Attributes, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmenityAttributes {
    pub name: String,
}

impl Attributes for AmenityAttributes {
    const TYPE_NAME: &'static str = "Amenity";
}

pub type Amenity = Model<AmenityAttributes>;

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::{Entity, Record};

    #[test]
    fn to_dict_differs_from_attributes() {
        let amenity = Amenity::with_overrides(Record::new()).unwrap();
        let record = amenity.to_dict().unwrap();

        assert_eq!(record.len(), 5);
        assert_ne!(
            serde_json::to_value(amenity.attributes()).unwrap(),
            serde_json::Value::Object(record)
        );
    }
}
