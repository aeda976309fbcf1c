use crate::container::{verify, BackupContainer};
use crate::error::Result;
use crate::store::read_container;
use std::path::Path;

/// Check a container file's hash without a passphrase
pub fn verify_file(path: &Path) -> Result<BackupContainer> {
    let container = read_container(path)?;
    verify(&container)?;
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::create_with;
    use crate::error::StrongboxError;
    use crate::header::{ContainerParams, KdfParams};
    use crate::store::write_container;
    use tempfile::tempdir;

    #[test]
    fn test_verify_intact_and_tampered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.sbx");
        let params = ContainerParams {
            kdf: KdfParams::fast(),
            ..Default::default()
        };
        let mut container = create_with(&"payload", "pw", &params).unwrap();
        write_container(&path, &container).unwrap();
        assert!(verify_file(&path).is_ok());

        container.hash = "0".repeat(64);
        write_container(&path, &container).unwrap();
        let err = verify_file(&path).unwrap_err();
        assert!(matches!(err, StrongboxError::Integrity(_)));
    }
}
