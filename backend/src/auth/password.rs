//! Password hashing using bcrypt
//!
//! bcrypt embeds a random per-call salt in the hash string, so hashing the
//! same password twice yields different outputs, and verification uses a
//! constant-time comparison.

use anyhow::Result;
use bcrypt::DEFAULT_COST;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a freshly generated salt (blocking operation)
    ///
    /// This is CPU-intensive. For async contexts, use `hash_async`.
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, DEFAULT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// A malformed hash string verifies as `false`, never as an error.
    pub fn verify(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "Pass1234";
        let hash = PasswordService::hash(password).unwrap();

        assert!(PasswordService::verify(password, &hash));
        assert!(!PasswordService::verify("WrongPass1", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "Pass1234";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(PasswordService::verify(password, &hash1));
        assert!(PasswordService::verify(password, &hash2));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!PasswordService::verify("Pass1234", "not-a-bcrypt-hash"));
        assert!(!PasswordService::verify("Pass1234", ""));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "Pass1234".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrongpass1".to_string(), hash)
            .await
            .unwrap());
    }
}
