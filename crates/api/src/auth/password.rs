//! Credential digest
//!
//! Passwords are stored as the unsalted lowercase-hex SHA-256 of the
//! plaintext and compared by recomputing the digest at login. The scheme is
//! deterministic: identical plaintexts always produce identical digests, so
//! two accounts sharing a password are distinguishable from the stored
//! column alone. This is a known weakness preserved for compatibility with
//! the existing user table; a deployment free to re-hash its credentials
//! should move to a salted, iterated KDF while keeping the login contract
//! (email + password in, token out) unchanged.

use sha2::{Digest, Sha256};

/// Digest a plaintext password for storage or comparison.
pub fn hash_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a plaintext attempt against a stored digest.
pub fn verify_password(plaintext: &str, stored_digest: &str) -> bool {
    hash_password(plaintext) == stored_digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(hash_password("pw1"), hash_password("pw1"));
        assert_ne!(hash_password("pw1"), hash_password("pw2"));
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hash_password("pw1"),
            "c592df4a86933b92addc9842402ddf198c638ea9be58916ee6e3734e1e3152f8"
        );
        assert_eq!(
            hash_password("Sunbeam"),
            "eee8a35cddba58267c1476890c506698c9548e2e63586a9f98c9ec8252e826f6"
        );
    }

    #[test]
    fn test_digest_is_lowercase_hex_of_fixed_length() {
        let digest = hash_password("anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_verify_password() {
        let stored = hash_password("pw1");
        assert!(verify_password("pw1", &stored));
        assert!(!verify_password("pw2", &stored));
    }

    #[test]
    fn test_empty_password_still_digests() {
        // Presence validation happens in the handlers; the digest itself
        // accepts any input.
        assert_eq!(hash_password("").len(), 64);
    }
}
