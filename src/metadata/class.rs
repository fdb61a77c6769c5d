use std::fmt;
use serde::{Serialize, Deserialize};
use super::attribute::{AttrType, AttributeDef};

/// The record classes the console knows about. Every record carries one of
/// these as its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassKind {
    BaseModel,
    User,
    State,
    City,
    Place,
    Amenity,
    Review,
}

const USER_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new("email", AttrType::String),
    AttributeDef::new("password", AttrType::String),
    AttributeDef::new("first_name", AttrType::String),
    AttributeDef::new("last_name", AttrType::String),
];

const STATE_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new("name", AttrType::String),
];

const CITY_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new("state_id", AttrType::String),
    AttributeDef::new("name", AttrType::String),
];

const PLACE_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new("city_id", AttrType::String),
    AttributeDef::new("user_id", AttrType::String),
    AttributeDef::new("name", AttrType::String),
    AttributeDef::new("description", AttrType::String),
    AttributeDef::new("number_rooms", AttrType::Integer),
    AttributeDef::new("number_bathrooms", AttrType::Integer),
    AttributeDef::new("max_guest", AttrType::Integer),
    AttributeDef::new("price_by_night", AttrType::Integer),
    AttributeDef::new("latitude", AttrType::Float),
    AttributeDef::new("longitude", AttrType::Float),
    AttributeDef::new("amenity_ids", AttrType::List),
];

const AMENITY_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new("name", AttrType::String),
];

const REVIEW_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new("place_id", AttrType::String),
    AttributeDef::new("user_id", AttrType::String),
    AttributeDef::new("text", AttrType::String),
];

impl ClassKind {
    pub const ALL: [ClassKind; 7] = [
        ClassKind::BaseModel,
        ClassKind::User,
        ClassKind::State,
        ClassKind::City,
        ClassKind::Place,
        ClassKind::Amenity,
        ClassKind::Review,
    ];

    /// Registry lookup by class name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<ClassKind> {
        Self::ALL.iter().copied().find(|class| class.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassKind::BaseModel => "BaseModel",
            ClassKind::User => "User",
            ClassKind::State => "State",
            ClassKind::City => "City",
            ClassKind::Place => "Place",
            ClassKind::Amenity => "Amenity",
            ClassKind::Review => "Review",
        }
    }

    /// Class-level attributes, not counting the managed `id` and timestamps.
    pub fn attributes(&self) -> &'static [AttributeDef] {
        match self {
            ClassKind::BaseModel => &[],
            ClassKind::User => USER_ATTRIBUTES,
            ClassKind::State => STATE_ATTRIBUTES,
            ClassKind::City => CITY_ATTRIBUTES,
            ClassKind::Place => PLACE_ATTRIBUTES,
            ClassKind::Amenity => AMENITY_ATTRIBUTES,
            ClassKind::Review => REVIEW_ATTRIBUTES,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&'static AttributeDef> {
        self.attributes().iter().find(|attr| attr.name == name)
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
