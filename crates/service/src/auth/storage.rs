use async_trait::async_trait;
use thiserror::Error;

use super::domain::{App, User};

/// Storage-engine independent failure kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("duplicate key")]
    Duplicate,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Insert a user and return the id assigned by the store.
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> Result<i64, StorageError>;
}

#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn user(&self, email: &str) -> Result<User, StorageError>;
    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait AppProvider: Send + Sync {
    async fn app(&self, app_id: i32) -> Result<App, StorageError>;
}

#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self) -> Result<(), StorageError>;
}

/// Everything a single backing store provides.
pub trait Storage: UserSaver + UserProvider + AppProvider + Pinger {}

impl<T: UserSaver + UserProvider + AppProvider + Pinger> Storage for T {}

/// Simple in-memory storage for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Inner {
        users: HashMap<String, User>, // key: email
        apps: HashMap<i32, App>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct MockStorage {
        inner: Mutex<Inner>,
        broken: AtomicBool,
        apps_broken: AtomicBool,
    }

    impl MockStorage {
        pub fn new() -> Self { Self::default() }

        pub fn with_app(self, id: i32, name: &str, secret: &str) -> Self {
            self.provision_app(App { id, name: name.into(), secret: secret.into() });
            self
        }

        pub fn provision_app(&self, app: App) {
            self.inner.lock().unwrap().apps.insert(app.id, app);
        }

        /// Returns false when no user has `user_id`.
        pub fn set_admin(&self, user_id: i64, is_admin: bool) -> bool {
            let mut inner = self.inner.lock().unwrap();
            match inner.users.values_mut().find(|u| u.id == user_id) {
                Some(u) => { u.is_admin = is_admin; true }
                None => false,
            }
        }

        /// Make every call fail with `StorageError::Other` until reset.
        pub fn set_broken(&self, broken: bool) {
            self.broken.store(broken, Ordering::SeqCst);
        }

        /// Make only app lookups fail with `StorageError::Other` until reset.
        pub fn set_apps_broken(&self, broken: bool) {
            self.apps_broken.store(broken, Ordering::SeqCst);
        }

        pub fn stored_user(&self, email: &str) -> Option<User> {
            self.inner.lock().unwrap().users.get(email).cloned()
        }

        pub fn user_count(&self) -> usize {
            self.inner.lock().unwrap().users.len()
        }

        fn check(&self, op: &str) -> Result<(), StorageError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(StorageError::Other(format!("storage.mock.{op}: connection refused")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserSaver for MockStorage {
        async fn save_user(&self, email: &str, pass_hash: &[u8]) -> Result<i64, StorageError> {
            self.check("save_user")?;
            let mut inner = self.inner.lock().unwrap();
            if inner.users.contains_key(email) {
                return Err(StorageError::Duplicate);
            }
            inner.last_id += 1;
            let user = User { id: inner.last_id, email: email.to_string(), pass_hash: pass_hash.to_vec(), is_admin: false };
            inner.users.insert(email.to_string(), user);
            Ok(inner.last_id)
        }
    }

    #[async_trait]
    impl UserProvider for MockStorage {
        async fn user(&self, email: &str) -> Result<User, StorageError> {
            self.check("user")?;
            self.inner.lock().unwrap().users.get(email).cloned().ok_or(StorageError::NotFound)
        }

        async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError> {
            self.check("is_admin")?;
            let inner = self.inner.lock().unwrap();
            inner.users.values().find(|u| u.id == user_id).map(|u| u.is_admin).ok_or(StorageError::NotFound)
        }
    }

    #[async_trait]
    impl AppProvider for MockStorage {
        async fn app(&self, app_id: i32) -> Result<App, StorageError> {
            self.check("app")?;
            if self.apps_broken.load(Ordering::SeqCst) {
                return Err(StorageError::Other("storage.mock.app: connection reset".into()));
            }
            self.inner.lock().unwrap().apps.get(&app_id).cloned().ok_or(StorageError::NotFound)
        }
    }

    #[async_trait]
    impl Pinger for MockStorage {
        async fn ping(&self) -> Result<(), StorageError> {
            self.check("ping")
        }
    }

}
