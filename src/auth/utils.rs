use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

/// Compares two secrets in time independent of where they differ.
///
/// Both sides are hashed first so the comparison length is fixed.
pub fn secrets_match(provided: &str, expected: &SecretString) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.expose_secret().as_bytes());

    provided
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub fn require_admin(provided: Option<&str>, expected: &SecretString) -> AppResult<()> {
    match provided {
        Some(secret) if !secret.is_empty() && secrets_match(secret, expected) => Ok(()),
        _ => Err(AppError::Unauthorized("Unauthorized".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn identical_secrets_match() {
        assert!(secrets_match("hunter2-admin", &secret("hunter2-admin")));
    }

    #[test]
    fn different_secrets_do_not_match() {
        assert!(!secrets_match("hunter2-admin", &secret("hunter3-admin")));
        assert!(!secrets_match("hunter2", &secret("hunter2-admin")));
    }

    #[test]
    fn require_admin_rejects_missing_and_empty() {
        let expected = secret("admin-secret");

        assert!(require_admin(Some("admin-secret"), &expected).is_ok());
        assert!(matches!(
            require_admin(None, &expected),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            require_admin(Some(""), &expected),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            require_admin(Some("wrong"), &expected),
            Err(AppError::Unauthorized(_))
        ));
    }
}
