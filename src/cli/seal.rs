use crate::container::{create_with, BackupContainer};
use crate::error::{Result, StrongboxError};
use crate::header::ContainerParams;
use crate::store::write_container;
use std::fmt;
use std::path::Path;
use zeroize::Zeroizing;

/// Options for the seal command
#[derive(Clone, Default)]
pub struct SealOptions {
    pub passphrase: Zeroizing<String>,
    pub params: ContainerParams,
}

impl fmt::Debug for SealOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealOptions")
            .field("passphrase", &"[REDACTED]")
            .field("params", &self.params)
            .finish()
    }
}

/// Seal a JSON document into a container file
/// Returns the written container
pub fn seal_file(
    input_path: &Path,
    output_path: &Path,
    options: &SealOptions,
) -> Result<BackupContainer> {
    let text = std::fs::read_to_string(input_path)?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        StrongboxError::Serialization(format!("{} is not valid JSON: {}", input_path.display(), e))
    })?;

    let container = create_with(&value, &options.passphrase, &options.params)?;
    write_container(output_path, &container)?;
    Ok(container)
}
