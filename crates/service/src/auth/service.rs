use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use super::errors::AuthError;
use super::password::{dummy_hash, hash_password, verify_password};
use super::storage::{AppProvider, Storage, StorageError, UserProvider, UserSaver};
use super::token::TokenIssuer;

/// Authentication and authorization rules, independent of transport and storage engine.
///
/// Holds only injected dependencies, so one instance is shared behind an `Arc`
/// by every concurrent request.
pub struct AuthService {
    usr_saver: Arc<dyn UserSaver>,
    usr_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        usr_saver: Arc<dyn UserSaver>,
        usr_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self { usr_saver, usr_provider, app_provider, issuer, token_ttl }
    }

    /// Wire all three capabilities to one store.
    pub fn from_storage<S: Storage + 'static>(storage: Arc<S>, issuer: Arc<dyn TokenIssuer>, token_ttl: Duration) -> Self {
        Self::new(storage.clone(), storage.clone(), storage, issuer, token_ttl)
    }

    /// Authenticate `email`/`password` and issue a credential for `app_id`.
    ///
    /// Unknown users, lookup failures and wrong passwords all return
    /// [`AuthError::InvalidCredentials`]; the cause only reaches the logs.
    ///
    /// # Examples
    /// ```
    /// use std::{sync::Arc, time::Duration};
    /// use service::auth::{AuthService, storage::mock::MockStorage, token::PlaceholderTokenIssuer};
    /// let store = Arc::new(MockStorage::new().with_app(1, "web", "secret"));
    /// let svc = AuthService::from_storage(store, Arc::new(PlaceholderTokenIssuer), Duration::from_secs(3600));
    /// tokio_test::block_on(svc.register_new_user("u@e.com", "Passw0rd")).unwrap();
    /// let token = tokio_test::block_on(svc.login("u@e.com", "Passw0rd", 1)).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String, AuthError> {
        let user = match self.usr_provider.user(email).await {
            Ok(user) => user,
            Err(e) => {
                if e == StorageError::NotFound {
                    warn!("user not found");
                } else {
                    error!(error = %e, "failed to get user");
                }
                // same Argon2 cost as a wrong password
                let password = password.to_owned();
                let _ = tokio::task::spawn_blocking(move || verify_password(&password, dummy_hash())).await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_hash(password, user.pass_hash.clone()).await {
            warn!(user_id = user.id, "invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.app_provider.app(app_id).await {
            Ok(app) => app,
            Err(e) => {
                if e == StorageError::NotFound {
                    warn!("app not found");
                } else {
                    error!(error = %e, "failed to get app");
                }
                return Err(AuthError::ApplicationLookupFailure(e));
            }
        };

        let token = self.issuer.issue(&user, &app, self.token_ttl).map_err(|e| {
            error!(user_id = user.id, error = %e, "failed to issue token");
            AuthError::from(e)
        })?;

        info!(user_id = user.id, "user logged in");
        Ok(token)
    }

    /// Create an account and return its id.
    ///
    /// Not idempotent: retrying a registration that already succeeded yields
    /// [`AuthError::UserAlreadyExists`].
    ///
    /// # Examples
    /// ```
    /// use std::{sync::Arc, time::Duration};
    /// use service::auth::{AuthService, AuthError, storage::mock::MockStorage, token::PlaceholderTokenIssuer};
    /// let svc = AuthService::from_storage(Arc::new(MockStorage::new()), Arc::new(PlaceholderTokenIssuer), Duration::from_secs(60));
    /// let id = tokio_test::block_on(svc.register_new_user("user@example.com", "Secret123")).unwrap();
    /// assert_eq!(id, 1);
    /// let again = tokio_test::block_on(svc.register_new_user("user@example.com", "other"));
    /// assert!(matches!(again, Err(AuthError::UserAlreadyExists)));
    /// ```
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn register_new_user(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        let owned = password.to_owned();
        let pass_hash = tokio::task::spawn_blocking(move || hash_password(&owned))
            .await
            .map_err(|e| AuthError::HashingFailed(e.to_string()))
            .and_then(|res| res)
            .map_err(|e| {
                error!(error = %e, "failed to hash password");
                e
            })?;

        let user_id = match self.usr_saver.save_user(email, &pass_hash).await {
            Ok(id) => id,
            Err(StorageError::Duplicate) => {
                warn!("user already exists");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => {
                error!(error = %e, "failed to save user");
                return Err(AuthError::Storage(e));
            }
        };

        info!(user_id, "user registered");
        Ok(user_id)
    }

    /// Report whether `user_id` has the administrator flag.
    #[instrument(skip(self))]
    pub async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        match self.usr_provider.is_admin(user_id).await {
            Ok(is_admin) => Ok(is_admin),
            Err(StorageError::NotFound) => {
                warn!("user not found");
                Err(AuthError::UserNotFound)
            }
            Err(e) => {
                error!(error = %e, "failed to check admin status");
                Err(AuthError::Storage(e))
            }
        }
    }
}

async fn verify_hash(password: &str, pass_hash: Vec<u8>) -> bool {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || verify_password(&password, &pass_hash))
        .await
        .unwrap_or(false)
}
