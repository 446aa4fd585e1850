mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    routing::{get, patch, post, put},
    Router,
};
use serde::de::DeserializeOwned;

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, validation_error, Error};
use crate::server::handlers::{landmarks, routes, users};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/routes", get(routes::list).post(routes::create))
        .route(
            "/routes/:id",
            get(routes::find).put(routes::update).delete(routes::delete),
        )
        .route("/routes/:id/landmarks", post(landmarks::append))
        .route(
            "/routes/:id/landmarks/:landmark_id",
            patch(landmarks::edit).delete(landmarks::remove),
        )
        .route("/routes/:id/order", put(landmarks::reorder))
        .route("/routes/:id/moves", post(landmarks::move_adjacent))
        .route("/users", post(users::register))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server stopped: {}", err);
            unexpected_error()
        })
}

pub(crate) type JsonBody = Result<Json<serde_json::Value>, JsonRejection>;

/// Deserializes a request body. Malformed JSON, a missing JSON content type
/// and shape errors (including unknown fields) all become a 400 carrying the
/// underlying message.
fn parse_body<T: DeserializeOwned>(body: JsonBody) -> Result<T, Error> {
    let Json(value) = body.map_err(|rejection| validation_error(rejection.to_string()))?;

    serde_json::from_value(value).map_err(|err| validation_error(err.to_string()))
}
