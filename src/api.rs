use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::User;
use crate::entities::{Direction, Landmark, LandmarkUpdate, NewRoute, Route, RouteUpdate};
use crate::error::Error;

/// Lookups answer `Ok(None)` for an absent route; `Err` is reserved for bad
/// input and failed writes.
#[async_trait]
pub trait RouteAPI {
    async fn create_route(&self, user: User, draft: NewRoute) -> Result<Route, Error>;
    async fn find_route(&self, id: &str) -> Result<Option<Route>, Error>;
    async fn update_route(&self, id: &str, update: RouteUpdate) -> Result<Option<Route>, Error>;
    async fn delete_route(&self, id: &str) -> Result<bool, Error>;
    async fn list_routes(&self) -> Result<Vec<Route>, Error>;
    async fn list_routes_by_author(&self, author_id: &str) -> Result<Vec<Route>, Error>;
}

#[async_trait]
pub trait LandmarkAPI {
    async fn append_landmark(&self, route_id: &str, landmark: Landmark) -> Result<Option<Route>, Error>;

    async fn remove_landmark(&self, route_id: &str, landmark_id: &str) -> Result<Option<Route>, Error>;

    async fn edit_landmark(
        &self,
        route_id: &str,
        landmark_id: &str,
        update: LandmarkUpdate,
    ) -> Result<Option<Route>, Error>;

    async fn reorder_landmarks(&self, route_id: &str, landmark_ids: Vec<String>) -> Result<Option<Route>, Error>;

    async fn move_landmark(
        &self,
        route_id: &str,
        index: usize,
        direction: Direction,
    ) -> Result<Option<Route>, Error>;
}

pub trait UserAPI {
    fn register_user(&self, name: &str) -> Result<User, Error>;
}

pub trait API: RouteAPI + LandmarkAPI + UserAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
