use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{validation_error, Error};

pub const MAX_LANDMARK_NAME_CHARS: usize = 50;
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// A named point on the map. A landmark belongs to exactly one route and its
/// `order` is only meaningful relative to the other landmarks of that route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(default = "generate_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub order: u32,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Editable text fields of a landmark. Position changes go through the
/// sequence operations instead.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandmarkUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Landmark {
    pub fn new(name: impl Into<String>, description: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            description: description.into(),
            lat,
            lng,
            order: 0,
        }
    }

    pub fn apply(&mut self, update: LandmarkUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }

        if let Some(description) = update.description {
            self.description = description;
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(validation_error("landmark id must not be empty"));
        }

        if self.name.chars().count() > MAX_LANDMARK_NAME_CHARS {
            return Err(validation_error(format!(
                "landmark name must be at most {} characters",
                MAX_LANDMARK_NAME_CHARS
            )));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(validation_error(format!(
                "landmark description must be at most {} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }

        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(validation_error(format!(
                "landmark {} has latitude {} outside [-90, 90]",
                self.id, self.lat
            )));
        }

        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(validation_error(format!(
                "landmark {} has longitude {} outside [-180, 180]",
                self.id, self.lng
            )));
        }

        Ok(())
    }
}
