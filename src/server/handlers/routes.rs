use axum::extract::{Extension, Json, Path, Query};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{DynAPI, RouteAPI, UserAPI};
use crate::entities::{sort_newest_first, Landmark, NewRoute, Route, RouteUpdate};
use crate::error::{not_found_error, Error};
use crate::server::{parse_body, JsonBody};

#[derive(Serialize, Deserialize)]
pub struct ListParams {
    #[serde(rename = "userId", alias = "authorId")]
    author_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    name: String,
    author: String,
    #[serde(default)]
    landmarks: Vec<Landmark>,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, Error> {
    let mut routes = match params.author_id {
        Some(author_id) => api.list_routes_by_author(author_id.trim()).await?,
        None => api.list_routes().await?,
    };

    sort_newest_first(&mut routes);

    Ok(Json(json!({ "routes": routes })))
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    body: JsonBody,
) -> Result<(StatusCode, Json<Value>), Error> {
    let params: CreateParams = parse_body(body)?;

    let user = api.register_user(&params.author)?;
    let draft = NewRoute {
        name: params.name,
        landmarks: params.landmarks,
    };
    let route = api.create_route(user, draft).await?;

    Ok((StatusCode::CREATED, Json(json!({ "routeId": route.id }))))
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Route>, Error> {
    let route = api
        .find_route(&id)
        .await?
        .ok_or_else(|| not_found_error("route"))?;

    Ok(route.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Route>, Error> {
    let update: RouteUpdate = parse_body(body)?;

    let route = api
        .update_route(&id, update)
        .await?
        .ok_or_else(|| not_found_error("route"))?;

    Ok(route.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Error> {
    if !api.delete_route(&id).await? {
        return Err(not_found_error("route"));
    }

    Ok(Json(json!({ "success": true })))
}
