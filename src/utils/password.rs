//! Argon2id password hashes stored as PHC strings.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use std::fmt;

/// Stored form of a password: the full PHC string (`$argon2id$v=19$...`),
/// which carries the algorithm parameters and salt alongside the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    phc: String,
}

impl PasswordDigest {
    /// Hash `password` under a fresh random salt
    pub fn create(password: &str) -> Result<Self, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string();
        Ok(Self { phc })
    }

    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("phc", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_original_password() {
        let digest = PasswordDigest::create("hunter22").unwrap();
        assert!(digest.verify("hunter22"));
        assert!(!digest.verify("hunter23"));
        assert!(!digest.verify(""));
    }

    #[test]
    fn test_stored_as_argon2id_phc_string() {
        let digest = PasswordDigest::create("abc12345").unwrap();
        assert!(digest.phc.starts_with("$argon2id$"));
        assert!(!digest.phc.contains("abc12345"));

        let parsed = PasswordHash::new(&digest.phc).unwrap();
        assert!(parsed.salt.is_some());
        assert!(parsed.params.get_decimal("m").is_some_and(|m| m >= 19 * 1024));
        assert!(parsed.params.get_decimal("t").is_some_and(|t| t >= 2));
    }

    #[test]
    fn test_salts_differ_per_digest() {
        let a = PasswordDigest::create("same-password1").unwrap();
        let b = PasswordDigest::create("same-password1").unwrap();
        assert_ne!(a, b);
        assert!(a.verify("same-password1") && b.verify("same-password1"));
    }

    #[test]
    fn test_corrupt_hash_never_verifies() {
        let digest = PasswordDigest {
            phc: "not-a-phc-string".to_string(),
        };
        assert!(!digest.verify("anything1"));
    }

    #[test]
    fn test_debug_hides_hash() {
        let digest = PasswordDigest::create("secret123").unwrap();
        let rendered = format!("{digest:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&digest.phc));
    }
}
