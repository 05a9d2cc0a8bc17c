use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use models::errors::ModelError;
use sea_orm::DatabaseConnection;

use crate::auth::domain::{App, User};
use crate::auth::storage::{AppProvider, Pinger, StorageError, UserProvider, UserSaver};

/// Relational store backed by a SeaORM connection pool.
///
/// Every round-trip is bounded by `query_timeout`; expiry is reported as
/// `StorageError::Other`, and dropping the returned future cancels the query.
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    query_timeout: Duration,
}

impl SeaOrmStorage {
    pub fn new(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, ModelError>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(ModelError::Duplicate(_))) => Err(StorageError::Duplicate),
            Ok(Err(e)) => Err(StorageError::Other(format!("{op}: {e}"))),
            Err(_) => Err(StorageError::Other(format!("{op}: deadline exceeded"))),
        }
    }
}

#[async_trait]
impl UserSaver for SeaOrmStorage {
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> Result<i64, StorageError> {
        let created = self
            .bounded("storage.seaorm.save_user", models::user::create(&self.db, email, pass_hash.to_vec()))
            .await?;
        Ok(created.id)
    }
}

#[async_trait]
impl UserProvider for SeaOrmStorage {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        self.bounded("storage.seaorm.user", models::user::find_by_email(&self.db, email))
            .await?
            .map(User::from)
            .ok_or(StorageError::NotFound)
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError> {
        self.bounded("storage.seaorm.is_admin", models::user::admin_flag(&self.db, user_id))
            .await?
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AppProvider for SeaOrmStorage {
    async fn app(&self, app_id: i32) -> Result<App, StorageError> {
        self.bounded("storage.seaorm.app", models::app::find(&self.db, app_id))
            .await?
            .map(App::from)
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl Pinger for SeaOrmStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        self.bounded("storage.seaorm.ping", async { self.db.ping().await.map_err(ModelError::from_db) })
            .await
    }
}
