use thiserror::Error;

use super::storage::StorageError;
use super::token::TokenError;

/// Error kinds returned by [`AuthService`](super::AuthService) operations.
///
/// The set is small and independent of the storage engine so a transport can
/// map it onto its own status codes.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("application lookup failed: {0}")]
    ApplicationLookupFailure(#[source] StorageError),
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    TokenIssuance(#[from] TokenError),
    #[error("storage failure: {0}")]
    Storage(#[source] StorageError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 1001,
            AuthError::ApplicationLookupFailure(_) => 1002,
            AuthError::UserAlreadyExists => 1003,
            AuthError::UserNotFound => 1004,
            AuthError::HashingFailed(_) => 1101,
            AuthError::TokenIssuance(_) => 1102,
            AuthError::Storage(_) => 1200,
        }
    }

    /// Whether the failure comes from infrastructure rather than caller input.
    pub fn is_internal(&self) -> bool {
        matches!(self, AuthError::HashingFailed(_) | AuthError::TokenIssuance(_) | AuthError::Storage(_))
    }
}
