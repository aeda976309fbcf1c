use crate::container::restore;
use crate::error::{Result, StrongboxError};
use crate::store::read_container;
use std::fmt;
use std::path::Path;
use zeroize::Zeroizing;

/// Options for the open command
#[derive(Clone, Default)]
pub struct RestoreOptions {
    pub passphrase: Zeroizing<String>,
}

impl fmt::Debug for RestoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreOptions")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Verify and decrypt a container file, writing the restored JSON
/// Returns the number of bytes written
pub fn open_file(input_path: &Path, output_path: &Path, options: &RestoreOptions) -> Result<usize> {
    let container = read_container(input_path)?;
    let value: serde_json::Value = restore(&container, &options.passphrase)?;

    let json = serde_json::to_string_pretty(&value)
        .map_err(|e| StrongboxError::Serialization(e.to_string()))?;
    std::fs::write(output_path, &json)?;
    Ok(json.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::seal::{seal_file, SealOptions};
    use crate::header::{ContainerParams, KdfParams};
    use crate::store::write_container;
    use tempfile::tempdir;

    fn seal(dir: &Path, json: &str, passphrase: &str) -> std::path::PathBuf {
        let input = dir.join("input.json");
        let sealed = dir.join("input.sbx");
        std::fs::write(&input, json).unwrap();
        let options = SealOptions {
            passphrase: Zeroizing::new(passphrase.to_string()),
            params: ContainerParams {
                kdf: KdfParams::fast(),
                ..Default::default()
            },
        };
        seal_file(&input, &sealed, &options).unwrap();
        sealed
    }

    fn options(passphrase: &str) -> RestoreOptions {
        RestoreOptions {
            passphrase: Zeroizing::new(passphrase.to_string()),
        }
    }

    #[test]
    fn test_open_roundtrip() {
        let dir = tempdir().unwrap();
        let original = r#"{"invoice": "INV-9", "lines": [{"qty": 2, "date": "2024-01-24"}]}"#;
        let sealed = seal(dir.path(), original, "pw");
        let output = dir.path().join("restored.json");

        let written = open_file(&sealed, &output, &options("pw")).unwrap();
        assert!(written > 0);

        let restored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let expected: serde_json::Value = serde_json::from_str(original).unwrap();
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_open_wrong_passphrase() {
        let dir = tempdir().unwrap();
        let sealed = seal(dir.path(), "[1, 2, 3]", "right");
        let output = dir.path().join("restored.json");

        let err = open_file(&sealed, &output, &options("wrong")).unwrap_err();
        assert!(matches!(err, StrongboxError::Corruption(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_open_tampered_file() {
        let dir = tempdir().unwrap();
        let sealed = seal(dir.path(), "[1, 2, 3]", "pw");
        let mut container = read_container(&sealed).unwrap();
        container.encrypted.insert(0, 'Z');
        write_container(&sealed, &container).unwrap();

        let err = open_file(&sealed, &dir.path().join("out.json"), &options("pw")).unwrap_err();
        assert!(matches!(err, StrongboxError::Integrity(_)));
    }
}
