//! Concrete storage backends for the auth capabilities.
pub mod seaorm;
