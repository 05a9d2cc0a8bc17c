use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness report served on `/health`.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn ok() -> Self { Self { status: "ok".into() } }
    pub fn unavailable() -> Self { Self { status: "unavailable".into() } }
}

/// Error body returned by every RPC endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}
