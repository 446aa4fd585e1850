use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{sequence, Landmark};
use crate::error::{validation_error, Error};

/// Fewest landmarks a route may be saved with. `Route::validate` is the only
/// place this is checked.
pub const MIN_LANDMARKS: usize = 2;

pub const MAX_ROUTE_NAME_CHARS: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    pub author: String,
    pub author_id: String,
    pub landmarks: Vec<Landmark>,
    pub created_at: DateTime<Utc>,
}

/// What a caller supplies to create a route; identity comes from the `User`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewRoute {
    pub name: String,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteUpdate {
    pub name: Option<String>,
    pub landmarks: Option<Vec<Landmark>>,
}

impl Route {
    pub fn new(author: &User, draft: NewRoute) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            author: author.name.clone(),
            author_id: author.id.clone(),
            landmarks: sequence::normalize(draft.landmarks),
            created_at: Utc::now(),
        }
    }

    /// Overlays the given fields. Identity, authorship and creation time are
    /// never touched.
    pub fn apply(&mut self, update: RouteUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }

        if let Some(landmarks) = update.landmarks {
            self.landmarks = sequence::normalize(landmarks);
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(validation_error("route name must not be empty"));
        }

        if name.chars().count() > MAX_ROUTE_NAME_CHARS {
            return Err(validation_error(format!(
                "route name must be at most {} characters",
                MAX_ROUTE_NAME_CHARS
            )));
        }

        if self.author.trim().is_empty() {
            return Err(validation_error("route author must not be empty"));
        }

        if self.landmarks.len() < MIN_LANDMARKS {
            return Err(validation_error(format!(
                "a route needs at least {} landmarks, got {}",
                MIN_LANDMARKS,
                self.landmarks.len()
            )));
        }

        let mut seen = HashSet::new();
        for landmark in self.landmarks.iter() {
            landmark.validate()?;

            if !seen.insert(landmark.id.as_str()) {
                return Err(validation_error(format!(
                    "landmark {} appears more than once",
                    landmark.id
                )));
            }
        }

        if !sequence::is_contiguous(&self.landmarks) {
            return Err(validation_error("landmark order must be contiguous from 0"));
        }

        Ok(())
    }
}

pub fn sort_newest_first(routes: &mut [Route]) {
    routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
