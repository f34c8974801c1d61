//! Password hashing and verification.
//!
//! Accounts never store or compare plaintext: the digest is a PHC string
//! produced by a salted Argon2id hash, and verification re-derives it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{DomainError, DomainResult};

/// Explicit hashing interface used wherever an account digest is produced
/// or checked.
pub trait CredentialHasher: Send + Sync {
    /// Derive a salted digest from a plaintext password.
    fn hash(&self, plain_text: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored digest.
    ///
    /// A malformed digest never verifies.
    fn verify(&self, plain_text: &str, digest: &str) -> bool;
}

/// Argon2id hasher producing PHC-encoded digests.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl Argon2Hasher {
    /// Hasher with explicit cost parameters.
    ///
    /// # Errors
    /// Returns a password error when the parameters are out of range.
    pub fn with_cost(m_cost_kib: u32, t_cost: u32, p_cost: u32) -> DomainResult<Self> {
        let params = Params::new(m_cost_kib, t_cost, p_cost, None)
            .map_err(|e| DomainError::password(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    #[inline]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, digest: &str) -> bool {
        // Parameters are read from the PHC string, so older digests still verify
        match PasswordHash::new(digest) {
            Ok(parsed) => self
                .argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::with_cost(8, 1, 1).unwrap()
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("SecurePassword123!").unwrap();

        assert!(hasher.verify("SecurePassword123!", &digest));
        assert!(!hasher.verify("WrongPassword123", &digest));
    }

    #[test]
    fn test_digest_is_not_plaintext() {
        let digest = hasher().hash("secret1").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(!digest.contains("secret1"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = hasher();
        let first = hasher.hash("SamePassword123").unwrap();
        let second = hasher.hash("SamePassword123").unwrap();

        // Different salts produce different hashes
        assert_ne!(first, second);
        assert!(hasher.verify("SamePassword123", &first));
        assert!(hasher.verify("SamePassword123", &second));
    }

    #[test]
    fn test_digest_verifies_with_other_cost_settings() {
        let digest = hasher().hash("secret1").unwrap();
        let other = Argon2Hasher::with_cost(16, 2, 1).unwrap();
        assert!(other.verify("secret1", &digest));
    }

    #[test]
    fn test_malformed_digest_never_verifies() {
        assert!(!hasher().verify("secret1", "not-a-phc-string"));
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        assert!(Argon2Hasher::with_cost(0, 0, 0).is_err());
    }
}
