//! Password hashing and verification backed by bcrypt.
//!
//! bcrypt only reads the first 72 bytes of its input. The non-truncating
//! variants are used so that two secrets differing after byte 72 never
//! verify against each other; longer passwords are refused at hash time.
//!
//! Plaintext passwords passed to these functions must never be logged.

use anyhow::Context;
use bcrypt::{BcryptError, DEFAULT_COST, non_truncating_hash, non_truncating_verify};

use crate::errors::AppError;
use crate::validation::ValidationIssue;

/// Longest password bcrypt can hash without discarding input.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const PASSWORD_TOO_LONG: &str = "Password must be at most 72 bytes";

/// Fails with a validation error when `password` exceeds [`MAX_PASSWORD_BYTES`].
pub fn hash_password(password: &str) -> Result<String, AppError> {
    match non_truncating_hash(password, DEFAULT_COST) {
        Ok(hash) => Ok(hash),
        Err(BcryptError::Truncation(_)) => Err(AppError::validation(vec![ValidationIssue::new(
            "password",
            PASSWORD_TOO_LONG,
        )])),
        Err(err) => Err(AppError::internal(
            anyhow::Error::new(err).context("Failed to hash password"),
        )),
    }
}

/// Returns `Err` when `hash` is not a well-formed bcrypt hash.
///
/// A password longer than [`MAX_PASSWORD_BYTES`] can never have been hashed,
/// so it is reported as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    match non_truncating_verify(password, hash) {
        Ok(matched) => Ok(matched),
        Err(BcryptError::Truncation(_)) => Ok(false),
        Err(err) => Err(AppError::internal(
            anyhow::Error::new(err).context("Failed to verify password"),
        )),
    }
}

/// [`hash_password`] on the blocking pool, keeping the async workers free
/// for other requests while bcrypt runs.
pub async fn hash_password_async(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .context("Password verification task failed")?
}
