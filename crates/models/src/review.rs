//! Review entity.

use hbnb_core::{Attributes, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewAttributes {
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl Attributes for ReviewAttributes {
    const TYPE_NAME: &'static str = "Review";
}

pub type Review = Model<ReviewAttributes>;
