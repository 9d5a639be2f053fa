//! Password hashing and token generation.
//!
//! Passwords are hashed with Argon2id. Access tokens are high-entropy random
//! strings; they are stored as SHA-256 digests and the plaintext is returned
//! to the caller exactly once, at login.

use argon2::{Argon2, PasswordVerifier};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::TravelError;

/// Default access-token length in characters (~190 bits of entropy).
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Hashes a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, TravelError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| TravelError::PasswordHashError)
}

/// Verifies a password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on mismatch; errors only if the stored hash is
/// malformed. Verification parameters come from the hash itself.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, TravelError> {
    let parsed = PasswordHash::new(hash).map_err(|_| TravelError::PasswordHashError)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Generates a cryptographically secure alphanumeric token.
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// Hashes a token with SHA-256 for at-rest storage.
///
/// Tokens are high-entropy random strings, so a fast hash is appropriate
/// here (unlike passwords).
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("securepassword").unwrap();
        assert!(verify_password("securepassword", &hash).unwrap());
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert_eq!(
            verify_password("whatever", "not-a-phc-string"),
            Err(TravelError::PasswordHashError)
        );
    }

    #[test]
    fn test_generate_token_length_and_charset() {
        let token = generate_token(DEFAULT_TOKEN_LENGTH);
        assert_eq!(token.len(), DEFAULT_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(32), generate_token(32));
    }

    #[test]
    fn test_hash_token_deterministic() {
        assert_eq!(hash_token("abc123"), hash_token("abc123"));
        assert_ne!(hash_token("abc123"), hash_token("abc124"));
        // SHA-256 as hex
        assert_eq!(hash_token("anytoken").len(), 64);
    }
}
