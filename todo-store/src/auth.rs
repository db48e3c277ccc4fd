//! Credential verification
//!
//! The store never sees plaintext passwords at rest: `users.password` holds a
//! PHC-format hash and a `CredentialVerifier` compares against it.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

use crate::error::{Result, StoreError};

/// One-way comparison of a plaintext password against a stored hash.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// `Ok(true)` on match, `Ok(false)` on mismatch. Errors only when the
    /// hash itself is unusable.
    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool>;
}

/// Argon2id verifier (default parameters)
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl Argon2Verifier {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password with a fresh random salt, for seeding `users`.
    pub fn hash_password(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::Credential(e.to_string()))
    }

    fn verify_blocking(plaintext: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| StoreError::Credential(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[async_trait]
impl CredentialVerifier for Argon2Verifier {
    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool> {
        // Argon2 is deliberately slow; keep it off the async workers.
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || Self::verify_blocking(&plaintext, &hash))
            .await
            .map_err(|e| StoreError::Credential(format!("verifier task failed: {e}")))?
    }
}
