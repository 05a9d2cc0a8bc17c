//! RPC endpoints of the auth service. Each handler validates the envelope,
//! calls one `AuthService` operation and maps the outcome onto HTTP.
use std::sync::Arc;

use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde::{Deserialize, Serialize};
use service::auth::{storage::Pinger, AuthService};
use utoipa::ToSchema;

use common::types::ErrorBody;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub pinger: Arc<dyn Pinger>,
}

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse { pub user_id: i64 }

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub app_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse { pub token: String }

#[derive(Debug, Deserialize, ToSchema)]
pub struct IsAdminRequest {
    #[serde(default)]
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IsAdminResponse { pub is_admin: bool }

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() { return Err(ApiError::Validation("email is required")); }
    if password.is_empty() { return Err(ApiError::Validation("password is required")); }
    Ok(())
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = RegisterRequest, responses((status = 200, description = "OK", body = RegisterResponse), (status = 400, description = "Bad Request", body = ErrorBody), (status = 409, description = "Conflict", body = ErrorBody)))]
pub async fn register(State(state): State<ServerState>, payload: Result<Json<RegisterRequest>, JsonRejection>) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(req) = payload?;
    require_credentials(&req.email, &req.password)?;
    let user_id = state.auth.register_new_user(&req.email, &req.password).await?;
    Ok(Json(RegisterResponse { user_id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = LoginRequest, responses((status = 200, description = "OK", body = LoginResponse), (status = 400, description = "Bad Request", body = ErrorBody), (status = 401, description = "Unauthorized", body = ErrorBody)))]
pub async fn login(State(state): State<ServerState>, payload: Result<Json<LoginRequest>, JsonRejection>) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload?;
    require_credentials(&req.email, &req.password)?;
    if req.app_id == 0 { return Err(ApiError::Validation("app_id is required")); }
    let token = state.auth.login(&req.email, &req.password, req.app_id).await?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(post, path = "/auth/is_admin", tag = "auth", request_body = IsAdminRequest, responses((status = 200, description = "OK", body = IsAdminResponse), (status = 400, description = "Bad Request", body = ErrorBody), (status = 404, description = "Not Found", body = ErrorBody)))]
pub async fn is_admin(State(state): State<ServerState>, payload: Result<Json<IsAdminRequest>, JsonRejection>) -> Result<Json<IsAdminResponse>, ApiError> {
    let Json(req) = payload?;
    if req.user_id == 0 { return Err(ApiError::Validation("user_id is required")); }
    let is_admin = state.auth.is_admin(req.user_id).await?;
    Ok(Json(IsAdminResponse { is_admin }))
}
