use utoipa::OpenApi;

use common::types::{ErrorBody, Health};

use crate::auth::{IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::auth::register,
        crate::auth::login,
        crate::auth::is_admin,
    ),
    components(
        schemas(
            Health,
            ErrorBody,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            IsAdminRequest,
            IsAdminResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
