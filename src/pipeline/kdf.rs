//! Argon2id passphrase-to-key derivation
//!
//! The passphrase is never stored; only the salt and cost parameters travel
//! with the ciphertext.

use crate::error::{Result, StrongboxError};
use crate::header::KdfParams;
use argon2::{Algorithm, Argon2, Params, Version};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Salt length in bytes
pub const SALT_SIZE: usize = 16;

/// Key length in bytes (256-bit for both cipher suites)
pub const KEY_SIZE: usize = 32;

/// A derived symmetric key, wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Generate a random salt using system CSPRNG
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a key from a passphrase and salt
pub fn derive_key(passphrase: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(StrongboxError::PassphraseRequired);
    }
    if salt.len() < 8 {
        return Err(StrongboxError::Cipher(format!(
            "salt too short: {} bytes",
            salt.len()
        )));
    }

    params.validate()?;

    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| StrongboxError::Cipher(format!("invalid Argon2 parameters: {}", e)))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    debug!(
        memory_cost = params.memory_cost,
        time_cost = params.time_cost,
        parallelism = params.parallelism,
        "deriving key"
    );

    let mut derived = DerivedKey {
        key: [0u8; KEY_SIZE],
    };
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut derived.key)
        .map_err(|e| StrongboxError::Cipher(format!("key derivation failed: {}", e)))?;

    Ok(derived)
}
