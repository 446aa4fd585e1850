use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, UserAPI};
use crate::auth::User;
use crate::error::Error;
use crate::server::{parse_body, JsonBody};

#[derive(Serialize, Deserialize)]
pub struct RegisterParams {
    username: String,
}

pub async fn register(
    Extension(api): Extension<DynAPI>,
    body: JsonBody,
) -> Result<Json<User>, Error> {
    let params: RegisterParams = parse_body(body)?;
    let user = api.register_user(&params.username)?;

    Ok(user.into())
}
