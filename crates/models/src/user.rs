//! User entity.

use hbnb_core::{Attributes, Model};
use serde::{Deserialize, Serialize};

/// Account holder. `password` is stored as given; hashing is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAttributes {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Attributes for UserAttributes {
    const TYPE_NAME: &'static str = "User";
}

pub type User = Model<UserAttributes>;

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::{Entity, Record};
    use serde_json::json;

    #[test]
    fn fields_default_to_empty_strings() {
        let user = User::with_overrides(Record::new()).unwrap();
        assert_eq!(user.attributes(), &UserAttributes::default());
    }

    #[test]
    fn overrides_set_named_fields() {
        let overrides = json!({"email": "betty@example.com", "first_name": "Betty"});
        let user = User::with_overrides(overrides.as_object().cloned().unwrap()).unwrap();

        assert_eq!(user.email, "betty@example.com");
        assert_eq!(user.first_name, "Betty");
        assert_eq!(user.last_name, "");
    }

    #[test]
    fn to_dict_datetime_fields_are_strings() {
        let record = User::with_overrides(Record::new()).unwrap().to_dict().unwrap();
        assert!(record["id"].is_string());
        assert!(record["created_at"].is_string());
        assert!(record["updated_at"].is_string());
        assert_eq!(record["__class__"], "User");
    }

    #[test]
    fn added_attributes_appear_in_to_dict() {
        let mut user = User::with_overrides(Record::new()).unwrap();
        user.set_extra("middle_name", json!("Holberton")).unwrap();
        user.set_extra("my_number", json!(98)).unwrap();

        let record = user.to_dict().unwrap();
        assert_eq!(record["middle_name"], "Holberton");
        assert_eq!(record["my_number"], 98);
    }
}
