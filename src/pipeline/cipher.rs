//! Authenticated encryption of text and bytes under a passphrase
//!
//! Two layers:
//! - [`seal`] / [`open`] work on raw bytes with an already-derived key and
//!   produce `nonce || ciphertext+tag`. The container uses these directly.
//! - [`encrypt`] / [`decrypt`] are self-contained: they derive the key from
//!   the passphrase with a fresh salt and emit a single base64 blob
//!   `header || nonce || ciphertext+tag`, where the header records the
//!   suite, KDF parameters and salt.

use crate::error::{Result, StrongboxError};
use crate::header::{CipherSuite, KdfParams, FORMAT_VERSION};
use crate::pipeline::kdf::{derive_key, generate_salt, DerivedKey, SALT_SIZE};
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::{rngs::OsRng, RngCore};

/// Authentication tag length (both suites)
pub const TAG_SIZE: usize = 16;

/// Header of a standalone encrypted blob
/// Layout: [version: 1][suite: 1][kdf: 12][salt: 16]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHeader {
    pub suite: CipherSuite,
    pub kdf: KdfParams,
    pub salt: [u8; SALT_SIZE],
}

impl BlobHeader {
    pub const SIZE: usize = 2 + KdfParams::SIZE + SALT_SIZE;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0] = FORMAT_VERSION as u8;
        buf[1] = self.suite.id();
        buf[2..2 + KdfParams::SIZE].copy_from_slice(&self.kdf.to_bytes());
        buf[2 + KdfParams::SIZE..].copy_from_slice(&self.salt);
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(StrongboxError::Cipher("ciphertext too short for header".into()));
        }
        if data[0] as u32 != FORMAT_VERSION {
            return Err(StrongboxError::Cipher(format!(
                "unsupported blob version: {}",
                data[0]
            )));
        }
        let suite = CipherSuite::from_id(data[1])?;
        let kdf = KdfParams::from_bytes(&data[2..2 + KdfParams::SIZE])?;
        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&data[2 + KdfParams::SIZE..Self::SIZE]);
        Ok(Self { suite, kdf, salt })
    }
}

/// Encrypt text under a passphrase with the default suite and KDF cost
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    encrypt_with(
        plaintext,
        passphrase,
        CipherSuite::default(),
        &KdfParams::default(),
    )
}

/// Encrypt text with an explicit suite and KDF cost
pub fn encrypt_with(
    plaintext: &str,
    passphrase: &str,
    suite: CipherSuite,
    kdf: &KdfParams,
) -> Result<String> {
    let header = BlobHeader {
        suite,
        kdf: *kdf,
        salt: generate_salt(),
    };
    let key = derive_key(passphrase, &header.salt, kdf)?;
    let header_bytes = header.to_bytes();
    let sealed = seal(plaintext.as_bytes(), &key, suite, &header_bytes)?;

    let mut blob = Vec::with_capacity(BlobHeader::SIZE + sealed.len());
    blob.extend_from_slice(&header_bytes);
    blob.extend_from_slice(&sealed);
    Ok(STANDARD.encode(blob))
}

/// Decrypt a blob produced by [`encrypt`] or [`encrypt_with`]
///
/// A wrong passphrase fails authentication and returns `Cipher`; it never
/// yields plaintext.
pub fn decrypt(blob: &str, passphrase: &str) -> Result<String> {
    let raw = STANDARD
        .decode(blob.trim())
        .map_err(|e| StrongboxError::Cipher(format!("invalid ciphertext encoding: {}", e)))?;
    let header = BlobHeader::from_bytes(&raw)?;
    let key = derive_key(passphrase, &header.salt, &header.kdf)?;
    let plaintext = open(
        &raw[BlobHeader::SIZE..],
        &key,
        header.suite,
        &raw[..BlobHeader::SIZE],
    )?;
    String::from_utf8(plaintext)
        .map_err(|e| StrongboxError::Cipher(format!("decrypted data is not UTF-8: {}", e)))
}

/// Encrypt bytes with a fresh random nonce; returns `nonce || ciphertext+tag`
pub fn seal(plaintext: &[u8], key: &DerivedKey, suite: CipherSuite, aad: &[u8]) -> Result<Vec<u8>> {
    let mut nonce = vec![0u8; suite.nonce_size()];
    OsRng.fill_bytes(&mut nonce);

    let payload = Payload {
        msg: plaintext,
        aad,
    };
    let ciphertext = match suite {
        CipherSuite::Aes256Gcm => aes_cipher(key)?.encrypt(Nonce::from_slice(&nonce), payload),
        CipherSuite::XChaCha20Poly1305 => {
            xchacha_cipher(key)?.encrypt(XNonce::from_slice(&nonce), payload)
        }
    }
    .map_err(|_| StrongboxError::Cipher("encryption failed".into()))?;

    let mut out = nonce;
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt `nonce || ciphertext+tag` produced by [`seal`]
pub fn open(sealed: &[u8], key: &DerivedKey, suite: CipherSuite, aad: &[u8]) -> Result<Vec<u8>> {
    let nonce_size = suite.nonce_size();
    if sealed.len() < nonce_size + TAG_SIZE {
        return Err(StrongboxError::Cipher(format!(
            "ciphertext too short: {} bytes",
            sealed.len()
        )));
    }
    let (nonce, ciphertext) = sealed.split_at(nonce_size);

    let payload = Payload {
        msg: ciphertext,
        aad,
    };
    let plaintext = match suite {
        CipherSuite::Aes256Gcm => aes_cipher(key)?.decrypt(Nonce::from_slice(nonce), payload),
        CipherSuite::XChaCha20Poly1305 => {
            xchacha_cipher(key)?.decrypt(XNonce::from_slice(nonce), payload)
        }
    };
    plaintext.map_err(|_| {
        StrongboxError::Cipher("authentication failed: wrong passphrase or corrupted data".into())
    })
}

fn aes_cipher(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| StrongboxError::Cipher(format!("failed to create cipher: {}", e)))
}

fn xchacha_cipher(key: &DerivedKey) -> Result<XChaCha20Poly1305> {
    XChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| StrongboxError::Cipher(format!("failed to create cipher: {}", e)))
}
