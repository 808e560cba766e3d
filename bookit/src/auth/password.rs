//! Password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{config::PasswordConfig, errors::Error};

fn argon2_from_config(config: &PasswordConfig) -> Result<Argon2<'static>, Error> {
    let params = Params::new(config.argon2_memory_kib, config.argon2_iterations, config.argon2_parallelism, None).map_err(|e| {
        Error::Internal {
            operation: format!("create argon2 params: {e}"),
        }
    })?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// Hashing cost comes from the configuration so tests and small deployments
/// can tune it; the defaults follow the Argon2id RFC recommendations.
pub fn hash_password(password: &str, config: &PasswordConfig) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_from_config(config)?;

    let hash = argon2.hash_password(password.as_bytes(), &salt).map_err(|e| Error::Internal {
        operation: format!("hash password: {e}"),
    })?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// Verification always uses the parameters embedded in the hash itself, so
/// parameter changes in config never invalidate existing hashes.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::Internal {
        operation: format!("parse password hash: {e}"),
    })?;

    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PasswordConfig {
        // Low-cost parameters to keep the test suite fast
        PasswordConfig {
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let config = test_config();
        let hash = hash_password("secreto123", &config).unwrap();

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secreto123", &hash).unwrap());
        assert!(!verify_password("incorrecta", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_hashes() {
        let config = test_config();
        let hash1 = hash_password("misma", &config).unwrap();
        let hash2 = hash_password("misma", &config).unwrap();

        // Salts differ, so hashes differ, but both verify
        assert_ne!(hash1, hash2);
        assert!(verify_password("misma", &hash1).unwrap());
        assert!(verify_password("misma", &hash2).unwrap());
    }

    #[test]
    fn test_verify_garbage_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }
}
