use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::storage::StorageError;
use service::auth::AuthError;
use thiserror::Error;

/// Code for requests rejected before they reach the auth service.
pub const VALIDATION_CODE: u16 = 1000;

/// Failure of an RPC call, rendered as `{error, code}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    /// Body that is not the expected JSON document.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(e) => match e {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::ApplicationLookupFailure(StorageError::NotFound) => StatusCode::BAD_REQUEST,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::ApplicationLookupFailure(_)
                | AuthError::HashingFailed(_)
                | AuthError::TokenIssuance(_)
                | AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message safe to put on the wire; infrastructure causes stay in the logs.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(msg) => ErrorBody { error: (*msg).to_string(), code: VALIDATION_CODE },
            ApiError::MalformedBody(_) => ErrorBody { error: self.to_string(), code: VALIDATION_CODE },
            ApiError::Auth(e) => {
                let error = match e {
                    AuthError::ApplicationLookupFailure(StorageError::NotFound) => "invalid app_id".to_string(),
                    AuthError::ApplicationLookupFailure(_) => "internal error".to_string(),
                    e if e.is_internal() => "internal error".to_string(),
                    e => e.to_string(),
                };
                ErrorBody { error, code: e.code() }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Fatal conditions while bringing the process up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot connect to database: {0}")]
    Database(String),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
