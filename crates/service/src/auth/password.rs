//! Salted password hashing (Argon2id, library default cost).
use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hash `password` into a PHC string, returned as bytes for storage.
pub fn hash_password(password: &str) -> Result<Vec<u8>, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string().into_bytes())
}

/// Check `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, pass_hash: &[u8]) -> bool {
    let Ok(encoded) = std::str::from_utf8(pass_hash) else { return false };
    let Ok(parsed) = PasswordHash::new(encoded) else { return false };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

static DUMMY_HASH: Lazy<Vec<u8>> = Lazy::new(|| hash_password("sso-dummy-password").unwrap_or_default());

/// Stand-in hash verified when the user lookup fails.
pub fn dummy_hash() -> &'static [u8] {
    &DUMMY_HASH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let a = hash_password("s3cret").unwrap();
        let b = hash_password("s3cret").unwrap();
        assert_ne!(a, b, "two hashes of the same password must differ by salt");
        assert_ne!(a, b"s3cret".to_vec());
        assert!(verify_password("s3cret", &a));
        assert!(verify_password("s3cret", &b));
        assert!(!verify_password("wrong", &a));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("s3cret", b"s3cret"));
        assert!(!verify_password("s3cret", &[0xff, 0xfe, 0x00]));
        assert!(!verify_password("", b""));
    }

    #[test]
    fn dummy_hash_is_real_argon2() {
        let hash = dummy_hash();
        assert!(hash.starts_with(b"$argon2"));
        assert!(std::str::from_utf8(hash).is_ok_and(|s| PasswordHash::new(s).is_ok()));
        assert!(!verify_password("s3cret", hash));
        assert_eq!(dummy_hash().as_ptr(), hash.as_ptr());
    }
}
