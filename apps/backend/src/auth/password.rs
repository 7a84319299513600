//! Password hashing, bcrypt behind a blocking thread pool.

use bcrypt::{hash, verify};

use crate::error::AppError;

/// Bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = 10;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool so the hash does not stall the async
/// runtime.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        hash(password, BCRYPT_COST)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    })
    .await
    .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Verify a password against a bcrypt hash.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed)
            .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
    })
    .await
    .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[tokio::test]
    async fn test_hash_and_verify_roundtrip() {
        let hashed = hash_password("correct horse battery staple").await.unwrap();

        assert!(verify_password("correct horse battery staple", &hashed)
            .await
            .unwrap());
        assert!(!verify_password("wrong password", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same password").await.unwrap();
        let b = hash_password("same password").await.unwrap();

        assert_ne!(a, b);
    }
}
