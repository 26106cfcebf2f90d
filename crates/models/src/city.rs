//! City entity.

use hbnb_core::{Attributes, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityAttributes {
    /// Id of the owning `State`.
    pub state_id: String,
    pub name: String,
}

impl Attributes for CityAttributes {
    const TYPE_NAME: &'static str = "City";
}

pub type City = Model<CityAttributes>;
