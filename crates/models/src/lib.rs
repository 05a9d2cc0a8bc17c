//! SeaORM entities and connection helpers for the SSO store.

pub mod errors;
pub mod db;
pub mod user;
pub mod app;

#[cfg(test)]
mod tests;
