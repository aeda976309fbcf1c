//! Strongbox - Encrypted, Integrity-Checked Backup Containers
//!
//! Turns any serializable value into a self-describing JSON container
//! that is encrypted under a passphrase and fingerprinted for tamper
//! detection. Restoring checks the fingerprint before any decryption
//! is attempted.
//!
//! ## Create Pipeline
//!
//! ```text
//! Value → Serialize → Compress → Argon2id → AEAD Seal → Base64 → Digest → Container
//! ```
//!
//! - **Serialize**: serde_json
//! - **Compress**: zstd (default), lz4, brotli, or none
//! - **Argon2id**: derives a 256-bit key from the passphrase and a fresh 16-byte salt
//! - **AEAD Seal**: AES-256-GCM (default) or XChaCha20-Poly1305, random nonce,
//!   container version and parameters bound as associated data
//! - **Digest**: SHA-256 (default), SHA3-256, or BLAKE3 over the encoded ciphertext
//!
//! Restore runs the same stages in reverse and fails fast with
//! [`StrongboxError::Integrity`] when the digest does not match.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use strongbox::{create, read_container, restore, write_container};
//!
//! let records = vec![("2024-01-24", 1200), ("2024-01-25", 980)];
//! let container = create(&records, "correct horse battery staple").unwrap();
//! write_container(Path::new("ledger.sbx"), &container).unwrap();
//!
//! let loaded = read_container(Path::new("ledger.sbx")).unwrap();
//! let restored: Vec<(String, u32)> = restore(&loaded, "correct horse battery staple").unwrap();
//! assert_eq!(restored.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod store;

pub use container::{create, create_with, restore, verify, BackupContainer};
pub use error::{Result, StrongboxError};
pub use header::{CipherSuite, Compression, ContainerParams, HashAlgorithm, KdfParams};
pub use store::{read_container, write_container};
