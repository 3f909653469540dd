use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{UserError, UserResult};

/// Hashes and verifies user passwords
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> UserResult<String>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable
    fn verify(&self, password: &str, hash: &str) -> UserResult<bool>;
}

/// Argon2id with the crate's default parameters and a random salt per hash
#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("12345678").unwrap();

        assert_ne!(hash, "12345678");
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("12345678", &hash).unwrap());
        assert!(!hasher.verify("87654321", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = Argon2Hasher;
        assert_ne!(hasher.hash("12345678").unwrap(), hasher.hash("12345678").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = Argon2Hasher.verify("12345678", "not-a-phc-string");
        assert!(matches!(result, Err(UserError::PasswordHash(_))));
    }
}
