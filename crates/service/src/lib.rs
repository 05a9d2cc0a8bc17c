//! Service layer of the SSO: the auth core and its storage adapter.
//! - Separates business rules from transport and data access.
//! - Reuses entity definitions in the `models` crate.
//! - Exposes a small, engine-independent error set.

pub mod auth;
#[cfg(test)]
pub mod test_support;
