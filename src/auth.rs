//! Password hashing for operator accounts.
//!
//! Thin wrappers over `bcrypt` that report failures as [`EngineError`].

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::{EngineError, EngineResult};

/// Hashes a password with the default bcrypt cost.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] for an empty password and
/// [`EngineError::PasswordHash`] when bcrypt fails.
pub fn hash_password(password: &str) -> EngineResult<String> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes a password with an explicit bcrypt cost (4 to 31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> EngineResult<String> {
    if password.is_empty() {
        return Err(EngineError::validation("password", "password is required"));
    }

    hash(password, cost).map_err(|e| EngineError::PasswordHash {
        message: e.to_string(),
    })
}

/// Checks a password against a stored bcrypt hash.
///
/// A well-formed hash that does not match returns `Ok(false)`; a malformed
/// hash is an error.
pub fn verify_password(password: &str, hashed: &str) -> EngineResult<bool> {
    verify(password, hashed).map_err(|e| EngineError::PasswordHash {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash_password_with_cost("s3nh@forte", TEST_COST).unwrap();
        assert_ne!(hashed, "s3nh@forte");
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("s3nh@forte", &hashed).unwrap());
    }

    #[test]
    fn test_wrong_password_does_not_verify() {
        let hashed = hash_password_with_cost("correta", TEST_COST).unwrap();
        assert!(!verify_password("errada", &hashed).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = hash_password_with_cost("repetida", TEST_COST).unwrap();
        let b = hash_password_with_cost("repetida", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(matches!(
            hash_password_with_cost("", TEST_COST),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_invalid_cost_is_a_hash_error() {
        assert!(matches!(
            hash_password_with_cost("senha", 2),
            Err(EngineError::PasswordHash { .. })
        ));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("senha", "not-a-hash"),
            Err(EngineError::PasswordHash { .. })
        ));
    }
}
