//! Account password storage.
//!
//! Argon2id with default parameters and a per-hash random salt; the PHC
//! string stored in `users.password_hash` carries both.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use questlog_core::error::CoreError;

/// Produce a PHC hash for storage.
pub fn hash_password(plain: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))
}

/// Does `plain` match the stored hash?
///
/// A mismatch is `Ok(false)`; only an unreadable stored hash is an error.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| CoreError::Internal(format!("stored password hash is unreadable: {e}")))?;

    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Internal(format!("password verification failed: {e}"))),
    }
}
