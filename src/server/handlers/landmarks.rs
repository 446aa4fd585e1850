use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, LandmarkAPI};
use crate::entities::{Direction, Landmark, LandmarkUpdate, Route};
use crate::error::{not_found_error, Error};
use crate::server::{parse_body, JsonBody};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReorderParams {
    landmark_ids: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveParams {
    index: usize,
    direction: Direction,
}

fn found(route: Option<Route>) -> Result<Json<Route>, Error> {
    route
        .map(Json)
        .ok_or_else(|| not_found_error("route"))
}

pub async fn append(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Route>, Error> {
    let landmark: Landmark = parse_body(body)?;

    found(api.append_landmark(&id, landmark).await?)
}

pub async fn edit(
    Extension(api): Extension<DynAPI>,
    Path((id, landmark_id)): Path<(String, String)>,
    body: JsonBody,
) -> Result<Json<Route>, Error> {
    let update: LandmarkUpdate = parse_body(body)?;

    found(api.edit_landmark(&id, &landmark_id, update).await?)
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path((id, landmark_id)): Path<(String, String)>,
) -> Result<Json<Route>, Error> {
    found(api.remove_landmark(&id, &landmark_id).await?)
}

pub async fn reorder(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Route>, Error> {
    let params: ReorderParams = parse_body(body)?;

    found(api.reorder_landmarks(&id, params.landmark_ids).await?)
}

pub async fn move_adjacent(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Route>, Error> {
    let params: MoveParams = parse_body(body)?;

    found(api.move_landmark(&id, params.index, params.direction).await?)
}
