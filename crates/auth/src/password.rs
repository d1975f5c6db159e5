use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Salted one-way password hash.
///
/// The salt is drawn fresh per derivation, so two users with the same
/// password store different digests. Plaintext passwords never leave the
/// `derive`/`verify` call stack and are never logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    salt: String,
    digest: String,
}

impl PasswordHash {
    /// Derive a hash from a plaintext password with a random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = Self::digest_with(&salt, password);
        Self {
            salt: hex::encode(salt),
            digest: hex::encode(digest),
        }
    }

    /// Check a plaintext password against this hash.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        hex::encode(Self::digest_with(&salt, password)) == self.digest
    }

    fn digest_with(salt: &[u8], password: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hash = PasswordHash::derive("hunter2");
        assert!(hash.verify("hunter2"));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = PasswordHash::derive("hunter2");
        assert!(!hash.verify("hunter3"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn derivations_use_distinct_salts() {
        let a = PasswordHash::derive("hunter2");
        let b = PasswordHash::derive("hunter2");
        assert_ne!(a, b);
        assert!(a.verify("hunter2"));
        assert!(b.verify("hunter2"));
    }
}
