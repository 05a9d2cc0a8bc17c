//! Credential issuance.
//!
//! [`TokenIssuer`] is the seam between the auth service and whatever
//! produces the opaque credential string handed back on login.
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::{App, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token issuance failed: {0}")]
    IssuanceFailed(String),
    #[error("invalid token: {0}")]
    Invalid(String),
}

pub trait TokenIssuer: Send + Sync {
    /// Produce a credential for `user` scoped to `app`, valid for `ttl`.
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}

pub const PLACEHOLDER_TOKEN: &str = "placeholder-token";

/// Stand-in issuer: always returns [`PLACEHOLDER_TOKEN`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTokenIssuer;

impl TokenIssuer for PlaceholderTokenIssuer {
    fn issue(&self, _user: &User, _app: &App, _ttl: Duration) -> Result<String, TokenError> {
        Ok(PLACEHOLDER_TOKEN.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub email: String,
    pub app_id: i32,
    pub exp: usize,
    pub iat: usize,
}

/// HS256 JWT signed with the application's secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    /// Validate a token issued for `app` and return its claims.
    pub fn decode(token: &str, app: &App) -> Result<Claims, TokenError> {
        let key = DecodingKey::from_secret(app.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        if app.secret.is_empty() {
            return Err(TokenError::IssuanceFailed(format!("app {} has no signing secret", app.id)));
        }
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| TokenError::IssuanceFailed(e.to_string()))?;
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::IssuanceFailed(format!("ttl of {}s overflows expiry", ttl.num_seconds())))?;
        let claims = Claims {
            uid: user.id,
            email: user.email.clone(),
            app_id: app.id,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(app.secret.as_bytes()))
            .map_err(|e| {
                tracing::error!(app_id = app.id, error = %e, "failed to encode jwt");
                TokenError::IssuanceFailed(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (User, App) {
        let user = User { id: 1, email: "alice@example.com".into(), pass_hash: vec![1], is_admin: false };
        let app = App { id: 1, name: "web".into(), secret: "test-secret".into() };
        (user, app)
    }

    #[test]
    fn placeholder_never_fails() {
        let (user, app) = fixtures();
        let token = PlaceholderTokenIssuer.issue(&user, &app, Duration::from_secs(1)).unwrap();
        assert_eq!(token, PLACEHOLDER_TOKEN);
        assert!(!token.is_empty());
    }

    #[test]
    fn jwt_round_trips_claims() {
        let (user, app) = fixtures();
        let token = JwtTokenIssuer.issue(&user, &app, Duration::from_secs(3600)).unwrap();
        let claims = JwtTokenIssuer::decode(&token, &app).unwrap();
        assert_eq!(claims.uid, 1);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 1);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn jwt_is_scoped_to_app_secret() {
        let (user, app) = fixtures();
        let token = JwtTokenIssuer.issue(&user, &app, Duration::from_secs(60)).unwrap();
        let other = App { secret: "another-secret".into(), ..app };
        let err = JwtTokenIssuer::decode(&token, &other).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn jwt_garbage_is_invalid_not_issuance() {
        let (_, app) = fixtures();
        let err = JwtTokenIssuer::decode("not.a.jwt", &app).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn jwt_huge_ttl_is_an_error() {
        let (user, app) = fixtures();
        let res = std::panic::catch_unwind(|| JwtTokenIssuer.issue(&user, &app, Duration::from_secs(10_000_000_000_000)));
        let err = res.expect("issue must not panic").unwrap_err();
        assert!(matches!(err, TokenError::IssuanceFailed(_)));
    }

    #[test]
    fn jwt_requires_secret() {
        let (user, mut app) = fixtures();
        app.secret.clear();
        let err = JwtTokenIssuer.issue(&user, &app, Duration::from_secs(60)).unwrap_err();
        assert!(matches!(err, TokenError::IssuanceFailed(_)));
    }
}
