use crate::error::{Result, StrongboxError};
use crate::header::{ContainerParams, FORMAT_VERSION};
use crate::pipeline::{
    compress, decompress, derive_key, fingerprint_with, generate_salt, open, seal, verify_with,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A sealed backup: encrypted payload plus a fingerprint of that payload
///
/// Serialized as a flat JSON record. `hash` covers `encrypted` only; the
/// timestamp is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupContainer {
    #[serde(default = "default_version")]
    pub version: u32,
    /// base64(nonce || ciphertext+tag)
    pub encrypted: String,
    /// Hex fingerprint of `encrypted`
    pub hash: String,
    /// Creation time (RFC 3339, UTC)
    pub timestamp: DateTime<Utc>,
    /// base64 KDF salt
    pub salt: String,
    #[serde(default)]
    pub params: ContainerParams,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

impl BackupContainer {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StrongboxError::Serialization(format!("container: {}", e)))
    }

    /// Parse a container from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StrongboxError::InvalidFormat(e.to_string()))
    }

    /// Whether `hash` still matches `encrypted`
    pub fn is_intact(&self) -> bool {
        verify_with(self.encrypted.as_bytes(), &self.hash, self.params.digest)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Size of the encrypted payload in bytes (after transport decoding)
    pub fn payload_len(&self) -> usize {
        let padding = self
            .encrypted
            .bytes()
            .rev()
            .take_while(|&b| b == b'=')
            .count();
        (self.encrypted.len() / 4 * 3).saturating_sub(padding)
    }
}

/// Create a container with default algorithms and KDF cost
pub fn create<T: Serialize + ?Sized>(value: &T, passphrase: &str) -> Result<BackupContainer> {
    create_with(value, passphrase, &ContainerParams::default())
}

/// Create a container
/// Pipeline: Serialize → Compress → Derive key → AEAD seal → Encode → Fingerprint
pub fn create_with<T: Serialize + ?Sized>(
    value: &T,
    passphrase: &str,
    params: &ContainerParams,
) -> Result<BackupContainer> {
    if passphrase.is_empty() {
        return Err(StrongboxError::PassphraseRequired);
    }

    // Step 1: Serialize to JSON
    let plaintext =
        serde_json::to_vec(value).map_err(|e| StrongboxError::Serialization(e.to_string()))?;

    // Step 2: Compress
    let compressed = compress(&plaintext, params.compression)?;
    debug!(
        plaintext_bytes = plaintext.len(),
        compressed_bytes = compressed.len(),
        compression = params.compression.as_str(),
        "payload compressed"
    );

    // Step 3: Derive key from a fresh salt
    let salt = generate_salt();
    let key = derive_key(passphrase, &salt, &params.kdf)?;

    // Step 4: Seal, binding version and params as associated data
    let aad = params.associated_data(FORMAT_VERSION);
    let sealed = seal(&compressed, &key, params.cipher, &aad)?;
    let encrypted = STANDARD.encode(sealed);

    // Step 5: Fingerprint the ciphertext
    let hash = fingerprint_with(encrypted.as_bytes(), params.digest);

    let container = BackupContainer {
        version: FORMAT_VERSION,
        encrypted,
        hash,
        timestamp: Utc::now(),
        salt: STANDARD.encode(salt),
        params: *params,
    };
    info!(
        cipher = params.cipher.as_str(),
        digest = params.digest.as_str(),
        encrypted_len = container.encrypted.len(),
        "backup container created"
    );
    Ok(container)
}

/// Check container integrity without decrypting
pub fn verify(container: &BackupContainer) -> Result<()> {
    if !container.is_intact() {
        warn!(digest = container.params.digest.as_str(), "container hash mismatch");
        return Err(StrongboxError::Integrity(
            "hash does not match encrypted payload".into(),
        ));
    }
    Ok(())
}

/// Restore the value sealed in a container
/// Pipeline: Verify hash → Decode → Derive key → AEAD open → Decompress → Deserialize
///
/// The hash is checked first; on mismatch no key derivation or decryption runs.
pub fn restore<T: DeserializeOwned>(container: &BackupContainer, passphrase: &str) -> Result<T> {
    // Step 1: Integrity gate
    verify(container)?;

    if container.version != FORMAT_VERSION {
        return Err(StrongboxError::InvalidFormat(format!(
            "unsupported container version: {}",
            container.version
        )));
    }

    // Step 2: Decode transport encoding
    let sealed = STANDARD
        .decode(&container.encrypted)
        .map_err(|e| StrongboxError::Codec(format!("encrypted payload: {}", e)))?;
    let salt = STANDARD
        .decode(&container.salt)
        .map_err(|e| StrongboxError::Codec(format!("salt: {}", e)))?;

    // Step 3: Derive key
    let key = derive_key(passphrase, &salt, &container.params.kdf)?;

    // Step 4: Open; an authentication failure here means wrong passphrase
    // (or edited params), since the hash already matched
    let aad = container.params.associated_data(container.version);
    let compressed = open(&sealed, &key, container.params.cipher, &aad).map_err(|e| match e {
        StrongboxError::Cipher(msg) => StrongboxError::Corruption(msg),
        other => other,
    })?;

    // Step 5: Decompress
    let plaintext = decompress(&compressed, container.params.compression)
        .map_err(|e| StrongboxError::Corruption(format!("payload does not decompress: {}", e)))?;

    // Step 6: Deserialize
    let value = serde_json::from_slice(&plaintext).map_err(|e| {
        StrongboxError::Corruption(format!("payload does not match expected structure: {}", e))
    })?;
    info!(plaintext_bytes = plaintext.len(), "backup container restored");
    Ok(value)
}
