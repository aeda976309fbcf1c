//! TOML configuration file support.
//!
//! Loads from (in order):
//! 1. An explicit `--config` path
//! 2. `strongbox.toml` next to the executable
//! 3. `$HOME/.config/strongbox/config.toml`
//! 4. Built-in defaults
//!
//! Environment variables (`STRONGBOX_LOG_LEVEL`, `STRONGBOX_CIPHER`,
//! `STRONGBOX_DIGEST`, `STRONGBOX_COMPRESSION`) override file values.
//! Passphrases are never read from configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StrongboxError};
use crate::header::{CipherSuite, Compression, ContainerParams, HashAlgorithm, KdfParams};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrongboxConfig {
    pub logging: LoggingConfig,
    pub container: ContainerConfig,
    pub kdf: KdfParams,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub cipher: CipherSuite,
    pub digest: HashAlgorithm,
    pub compression: Compression,
}

impl StrongboxConfig {
    /// Load from a specific path. A missing file yields defaults; a
    /// malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            StrongboxError::Config(format!("read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| StrongboxError::Config(format!("parse config TOML: {}", e)))?;
        config
            .kdf
            .validate()
            .map_err(|e| StrongboxError::Config(format!("[kdf]: {}", e)))?;
        Ok(config)
    }

    /// Load using the standard search order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            return Self::load_from(p);
        }

        if let Ok(exe) = std::env::current_exe() {
            let candidate = exe.with_file_name("strongbox.toml");
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        if let Some(home) = std::env::var_os("HOME") {
            let candidate = PathBuf::from(home)
                .join(".config")
                .join("strongbox")
                .join("config.toml");
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = lookup("STRONGBOX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(cipher) = lookup("STRONGBOX_CIPHER") {
            self.container.cipher = cipher.parse().map_err(env_error("STRONGBOX_CIPHER"))?;
        }
        if let Some(digest) = lookup("STRONGBOX_DIGEST") {
            self.container.digest = digest.parse().map_err(env_error("STRONGBOX_DIGEST"))?;
        }
        if let Some(compression) = lookup("STRONGBOX_COMPRESSION") {
            self.container.compression = compression
                .parse()
                .map_err(env_error("STRONGBOX_COMPRESSION"))?;
        }
        Ok(())
    }

    /// Algorithm and KDF choices for new containers
    pub fn container_params(&self) -> ContainerParams {
        ContainerParams {
            cipher: self.container.cipher,
            kdf: self.kdf,
            digest: self.container.digest,
            compression: self.container.compression,
        }
    }
}

fn env_error(var: &'static str) -> impl Fn(StrongboxError) -> StrongboxError {
    move |e| StrongboxError::Config(format!("{}: {}", var, e))
}
