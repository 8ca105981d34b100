use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use std::sync::LazyLock;

use rand_core::OsRng;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hash `plaintext` with Argon2id (crate default cost) and a fresh random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`), which embeds salt and parameters.
pub fn hash(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordError::Hash(err.to_string()))
}

/// Check `plaintext` against a stored PHC hash.
///
/// A mismatch is `false`, not an error. An unparsable stored hash is also `false`.
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

/// Hash checked when the username is unknown, so that branch pays the same Argon2 cost.
static DECOY_HASH: LazyLock<Option<String>> = LazyLock::new(|| match hash("decoy") {
    Ok(hash) => Some(hash),
    Err(err) => {
        warn!(error = %err, "failed to prepare decoy password hash");
        None
    }
});

/// Run a full verification against a throwaway hash. Always `false`.
pub fn verify_decoy(plaintext: &str) -> bool {
    if let Some(decoy) = DECOY_HASH.as_deref() {
        let _ = verify(plaintext, decoy);
    }
    false
}
