//! Concrete entity types (users, places, cities, states, amenities, reviews).
//!
//! Each type is a declared attribute set over `hbnb_core::Model`; identity,
//! timestamps and the record form come from the core crate.

pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::{Amenity, AmenityAttributes};
pub use city::{City, CityAttributes};
pub use place::{Place, PlaceAttributes};
pub use review::{Review, ReviewAttributes};
pub use state::{State, StateAttributes};
pub use user::{User, UserAttributes};

use hbnb_core::ModelCatalog;

/// Reconstruction table covering every entity type in this crate.
pub fn catalog() -> ModelCatalog {
    let mut catalog = ModelCatalog::new();
    catalog
        .register::<UserAttributes>()
        .register::<StateAttributes>()
        .register::<CityAttributes>()
        .register::<AmenityAttributes>()
        .register::<PlaceAttributes>()
        .register::<ReviewAttributes>();
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::{Entity, Record};

    #[test]
    fn catalog_covers_every_type() {
        assert_eq!(
            catalog().type_names(),
            vec!["Amenity", "City", "Place", "Review", "State", "User"]
        );
    }

    #[test]
    fn catalog_dispatches_on_discriminator() {
        let catalog = catalog();
        let city = City::with_overrides(Record::new()).unwrap();
        let record = city.to_dict().unwrap();

        let rebuilt = catalog.get("City").unwrap()(&record).unwrap();
        assert_eq!(rebuilt.type_name(), "City");
        assert_eq!(rebuilt.key(), city.key());
    }
}
