//! Password hashing with bcrypt.
//!
//! bcrypt is CPU bound, so both operations run on the blocking thread pool.

use crate::server::error::AppError;

#[cfg(not(test))]
const BCRYPT_COST: u32 = 10;

// Minimum cost keeps service tests fast.
#[cfg(test)]
const BCRYPT_COST: u32 = 4;

/// Hashes a plaintext password.
///
/// # Returns
/// - `Ok(String)` - bcrypt hash including salt and cost
/// - `Err(AppError::BcryptErr)` - Hashing failed
/// - `Err(AppError::JoinErr)` - Blocking task panicked
pub async fn hash_password(password: String) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST)).await??;

    Ok(hash)
}

/// Checks a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let matches =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await?;

    Ok(matches)
}
