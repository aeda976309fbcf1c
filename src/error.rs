use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrongboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be represented as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failure inside a crypto primitive (key derivation, cipher setup, authentication)
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// Stored digest does not match the ciphertext; the container was altered
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    /// Digest matched but the payload did not authenticate or parse
    #[error("Backup is unreadable: {0}")]
    Corruption(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Invalid container format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Passphrase required")]
    PassphraseRequired,
}

impl StrongboxError {
    /// Pipeline stage the error originated from, for user-facing messages
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialize",
            Self::Cipher(_) | Self::PassphraseRequired => "cipher",
            Self::Integrity(_) => "integrity",
            Self::Corruption(_) => "restore",
            Self::Codec(_) => "codec",
            Self::InvalidFormat(_) => "parse",
            Self::UnsupportedAlgorithm(_) | Self::Config(_) => "config",
        }
    }

    /// True when the container was modified after creation
    pub fn is_tampered(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }

    /// True when the container is intact but could not be opened,
    /// which almost always means the passphrase is wrong
    pub fn is_wrong_passphrase(&self) -> bool {
        matches!(self, Self::Corruption(_))
    }
}

pub type Result<T> = std::result::Result<T, StrongboxError>;
