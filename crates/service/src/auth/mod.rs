//! Auth module: domain types, storage capabilities, the store adapter,
//! token issuance and the service enforcing the login rules.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod service;
pub mod storage;
pub mod token;

pub use errors::AuthError;
pub use service::AuthService;
