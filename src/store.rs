use crate::container::BackupContainer;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write a container to disk as pretty JSON (creates new file or overwrites)
pub fn write_container(path: &Path, container: &BackupContainer) -> Result<()> {
    let json = container.to_json()?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(path = %path.display(), bytes = json.len() + 1, "container written");
    Ok(())
}

/// Read a container from disk
pub fn read_container(path: &Path) -> Result<BackupContainer> {
    let json = std::fs::read_to_string(path)?;
    BackupContainer::from_json(&json)
}
