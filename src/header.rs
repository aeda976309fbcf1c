use crate::error::{Result, StrongboxError};
use serde::{Deserialize, Serialize};

/// Current container/blob format version
pub const FORMAT_VERSION: u32 = 1;

/// Compression algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Zstd,
    Lz4,
    Brotli,
    None,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zstd => "zstd",
            Self::Lz4 => "lz4",
            Self::Brotli => "brotli",
            Self::None => "none",
        }
    }

    pub(crate) fn id(&self) -> u8 {
        match self {
            Self::Zstd => 1,
            Self::Lz4 => 2,
            Self::Brotli => 3,
            Self::None => 0,
        }
    }
}

impl std::str::FromStr for Compression {
    type Err = StrongboxError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "zstd" => Ok(Self::Zstd),
            "lz4" => Ok(Self::Lz4),
            "brotli" => Ok(Self::Brotli),
            "none" => Ok(Self::None),
            _ => Err(StrongboxError::UnsupportedAlgorithm(format!(
                "compression: {}",
                s
            ))),
        }
    }
}

/// Hash algorithm used for container fingerprints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha3,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha3 => "sha3",
            Self::Blake3 => "blake3",
        }
    }

    pub(crate) fn id(&self) -> u8 {
        match self {
            Self::Sha256 => 1,
            Self::Sha3 => 2,
            Self::Blake3 => 3,
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = StrongboxError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha2" => Ok(Self::Sha256),
            "sha3" | "sha3-256" => Ok(Self::Sha3),
            "blake3" => Ok(Self::Blake3),
            _ => Err(StrongboxError::UnsupportedAlgorithm(format!("hash: {}", s))),
        }
    }
}

/// AEAD cipher suite options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CipherSuite {
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
}

impl CipherSuite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::XChaCha20Poly1305 => "xchacha20-poly1305",
        }
    }

    /// Nonce length in bytes
    pub fn nonce_size(&self) -> usize {
        match self {
            Self::Aes256Gcm => 12,
            Self::XChaCha20Poly1305 => 24,
        }
    }

    pub(crate) fn id(&self) -> u8 {
        match self {
            Self::Aes256Gcm => 1,
            Self::XChaCha20Poly1305 => 2,
        }
    }

    pub(crate) fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Aes256Gcm),
            2 => Ok(Self::XChaCha20Poly1305),
            other => Err(StrongboxError::UnsupportedAlgorithm(format!(
                "cipher id: {}",
                other
            ))),
        }
    }
}

impl std::str::FromStr for CipherSuite {
    type Err = StrongboxError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "aes-256-gcm" | "aes256gcm" | "aes" => Ok(Self::Aes256Gcm),
            "xchacha20-poly1305" | "xchacha20poly1305" | "xchacha" => {
                Ok(Self::XChaCha20Poly1305)
            }
            _ => Err(StrongboxError::UnsupportedAlgorithm(format!(
                "cipher: {}",
                s
            ))),
        }
    }
}

/// Argon2id cost parameters
/// Layout: [memory_cost: 4][time_cost: 4][parallelism: 4], little-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    pub const SIZE: usize = 12;

    /// Upper bounds for stored parameters (256 MiB, 10 passes, 16 lanes).
    /// Stored params are outside the hash; these bound the work done
    /// before authentication can fail.
    pub const MAX_MEMORY_COST: u32 = 262_144;
    pub const MAX_TIME_COST: u32 = 10;
    pub const MAX_PARALLELISM: u32 = 16;

    /// Cheap parameters for tests and throwaway data
    pub fn fast() -> Self {
        Self {
            memory_cost: 256,
            time_cost: 1,
            parallelism: 1,
        }
    }

    /// Reject costs above the ceilings; lower bounds are left to Argon2
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("memory_cost", self.memory_cost, Self::MAX_MEMORY_COST),
            ("time_cost", self.time_cost, Self::MAX_TIME_COST),
            ("parallelism", self.parallelism, Self::MAX_PARALLELISM),
        ];
        for (name, value, max) in checks {
            if value > max {
                return Err(StrongboxError::InvalidFormat(format!(
                    "KDF {} {} exceeds limit {}",
                    name, value, max
                )));
            }
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.memory_cost.to_le_bytes());
        buf[4..8].copy_from_slice(&self.time_cost.to_le_bytes());
        buf[8..12].copy_from_slice(&self.parallelism.to_le_bytes());
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(StrongboxError::InvalidFormat("KDF parameters too short".into()));
        }
        let mut word = [0u8; 4];
        let mut read = |offset: usize| {
            word.copy_from_slice(&data[offset..offset + 4]);
            u32::from_le_bytes(word)
        };
        Ok(Self {
            memory_cost: read(0),
            time_cost: read(4),
            parallelism: read(8),
        })
    }
}

/// Algorithm choices recorded in every container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContainerParams {
    pub cipher: CipherSuite,
    pub kdf: KdfParams,
    pub digest: HashAlgorithm,
    pub compression: Compression,
}

impl ContainerParams {
    /// Bytes bound into the AEAD tag so parameter edits fail authentication
    pub fn associated_data(&self, version: u32) -> Vec<u8> {
        let mut aad = Vec::with_capacity(32 + KdfParams::SIZE);
        aad.extend_from_slice(b"strongbox-container");
        aad.extend_from_slice(&version.to_le_bytes());
        aad.push(self.cipher.id());
        aad.push(self.digest.id());
        aad.push(self.compression.id());
        aad.extend_from_slice(&self.kdf.to_bytes());
        aad
    }
}
