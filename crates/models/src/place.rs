//! Place entity.

use hbnb_core::{Attributes, Model};
use serde::{Deserialize, Serialize};

/// A rentable place.
///
/// `city_id` and `user_id` point at a `City` and the owning `User`;
/// `amenity_ids` lists `Amenity` ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceAttributes {
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_of_rooms: i64,
    pub number_of_bathrooms: i64,
    pub max_guests: i64,
    pub price_per_night: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub amenity_ids: Vec<String>,
}

impl Attributes for PlaceAttributes {
    const TYPE_NAME: &'static str = "Place";
}

pub type Place = Model<PlaceAttributes>;
