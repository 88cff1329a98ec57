//! Password Hashing and Verification
//!
//! - Argon2id hashing with a configured iteration count (the cost factor)
//! - PHC string storage format, so parameters travel with the hash
//! - Zeroization of clear text on drop
//!
//! The only point where a wrong password is told apart from a right one is
//! [`PasswordHasher::verify`], which defers to Argon2's constant-time
//! comparison.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Longest accepted password, in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Invalid hash cost: {0}")]
    InvalidCost(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password
// ============================================================================

/// Clear text password, zeroized on drop
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accepts any non-empty password without control characters
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = raw.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if raw
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(raw))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

/// Hash in PHC string format (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored PHC string, rejecting anything that does not parse
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher bound to a cost factor
///
/// `cost` is the Argon2 iteration count. Memory and parallelism stay at the
/// OWASP defaults (19 MiB, 1 lane).
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            cost,
        })
    }

    /// Hash with a fresh 16-byte salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Parameters are read from the stored hash, so hashes made under an
    /// older cost still verify.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(ClearTextPassword::new("pw123".to_string()).is_ok());
    }

    #[test]
    fn test_password_empty() {
        assert_eq!(
            ClearTextPassword::new(String::new()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0}def".to_string());
        assert_eq!(result.unwrap_err(), PasswordPolicyError::InvalidCharacter);
    }

    #[test]
    fn test_zero_cost_is_rejected() {
        assert!(matches!(
            PasswordHasher::new(0),
            Err(PasswordHashError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(1).unwrap();
        let hashed = hasher.hash(&clear("pw123")).unwrap();

        assert!(hasher.verify(&clear("pw123"), &hashed));
        assert!(!hasher.verify(&clear("pw124"), &hashed));
    }

    #[test]
    fn test_hash_embeds_cost() {
        let hasher = PasswordHasher::new(3).unwrap();
        let hashed = hasher.hash(&clear("pw123")).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.as_phc_string().contains("t=3"));
    }

    #[test]
    fn test_verify_accepts_hash_from_other_cost() {
        let old = PasswordHasher::new(1).unwrap();
        let new = PasswordHasher::new(2).unwrap();
        let hashed = old.hash(&clear("pw123")).unwrap();

        assert!(new.verify(&clear("pw123"), &hashed));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new(1).unwrap();
        let a = hasher.hash(&clear("pw123")).unwrap();
        let b = hasher.hash(&clear("pw123")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = PasswordHasher::new(1).unwrap();
        let hashed = hasher.hash(&clear("pw123")).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&clear("pw123"), &restored));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", clear("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
