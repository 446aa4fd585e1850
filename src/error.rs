use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug};

/// Codes 1..=99 are server-side failures, 404 is an absent record, anything
/// else is input the caller can correct.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

pub const NOT_FOUND_CODE: i32 = 404;

impl Error {
    pub fn is_not_found(&self) -> bool {
        self.code == NOT_FOUND_CODE
    }

    pub fn is_internal(&self) -> bool {
        (1..=99).contains(&self.code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        storage_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            NOT_FOUND_CODE => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn validation_error(message: impl Into<String>) -> Error {
    Error {
        code: 102,
        message: message.into(),
    }
}

pub fn not_found_error(what: &str) -> Error {
    Error {
        code: NOT_FOUND_CODE,
        message: format!("{} not found", what),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn config_error(message: impl Into<String>) -> Error {
    Error {
        code: 1,
        message: message.into(),
    }
}

pub fn storage_error<T: Debug>(err: T) -> Error {
    Error {
        code: 2,
        message: format!("storage error: {:?}", err),
    }
}

pub fn serialization_error(err: serde_json::Error) -> Error {
    Error {
        code: 3,
        message: format!("serialization error: {}", err),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_their_message() {
        let response = storage_error("disk on fire").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(
            not_found_error("route").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            validation_error("name must not be empty")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert!(storage_error("x").is_internal());
        assert!(!validation_error("x").is_internal());
    }
}
