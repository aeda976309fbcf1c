use crate::error::Result;
use crate::store::read_container;
use std::path::Path;

/// Display information about a container file
pub fn show_info(path: &Path) -> Result<String> {
    let container = read_container(path)?;
    let params = &container.params;

    let mut output = String::new();

    output.push_str("Strongbox Container Information\n");
    output.push_str("===============================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Version: {}\n", container.version));
    output.push_str(&format!("Created: {}\n", container.created_at().to_rfc3339()));
    output.push('\n');

    output.push_str("Algorithms:\n");
    output.push_str(&format!("  Cipher: {}\n", params.cipher.as_str()));
    output.push_str(&format!("  Digest: {}\n", params.digest.as_str()));
    output.push_str(&format!("  Compression: {}\n", params.compression.as_str()));
    output.push('\n');

    output.push_str("Key Derivation (argon2id):\n");
    output.push_str(&format!("  Memory: {}\n", format_size(params.kdf.memory_cost as u64 * 1024)));
    output.push_str(&format!("  Iterations: {}\n", params.kdf.time_cost));
    output.push_str(&format!("  Parallelism: {}\n", params.kdf.parallelism));
    output.push('\n');

    output.push_str("Payload:\n");
    output.push_str(&format!("  Sealed size: {}\n", format_size(container.payload_len() as u64)));
    output.push_str(&format!("  Hash: {}\n", container.hash));
    output.push_str(&format!(
        "  Integrity: {}\n",
        if container.is_intact() { "OK" } else { "FAILED" }
    ));

    Ok(output)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
