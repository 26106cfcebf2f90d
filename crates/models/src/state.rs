//! State entity.

use hbnb_core::{Attributes, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateAttributes {
    pub name: String,
}

impl Attributes for StateAttributes {
    const TYPE_NAME: &'static str = "State";
}

pub type State = Model<StateAttributes>;
