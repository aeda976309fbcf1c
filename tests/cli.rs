use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

const FAST_CONFIG: &str = r#"
[kdf]
memory_cost = 256
time_cost = 1
parallelism = 1
"#;

fn strongbox_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_strongbox"));
    for var in [
        "STRONGBOX_PASSPHRASE",
        "STRONGBOX_CIPHER",
        "STRONGBOX_DIGEST",
        "STRONGBOX_COMPRESSION",
        "STRONGBOX_LOG_LEVEL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(strongbox_command().args(args).output()?)
}

fn write_fast_config(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("strongbox.toml");
    fs::write(&path, FAST_CONFIG)?;
    Ok(path)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn version_flag_prints_build_info() -> Result<(), Box<dyn Error>> {
    let output = run(&["-V"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("strongbox "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn no_subcommand_prints_help() -> Result<(), Box<dyn Error>> {
    let output = run(&[])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("seal"));
    assert!(stdout.contains("open"));
    assert!(stdout.contains("verify"));
    assert!(stdout.contains("info"));
    Ok(())
}

#[test]
fn cli_end_to_end_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = write_fast_config(dir.path())?;
    let input = dir.path().join("export.json");
    let sealed = dir.path().join("export.sbx");
    let restored = dir.path().join("restored.json");

    let document = r#"{"customers": [{"name": "Zoë", "since": "2024-01-24", "balance": 12.5}]}"#;
    fs::write(&input, document)?;

    let seal = run(&[
        "--config",
        path_str(&config),
        "seal",
        "--passphrase",
        "open sesame",
        "--cipher",
        "xchacha20-poly1305",
        path_str(&input),
        path_str(&sealed),
    ])?;
    assert!(
        seal.status.success(),
        "seal command failed: {}",
        String::from_utf8_lossy(&seal.stderr)
    );
    assert!(String::from_utf8(seal.stdout)?.contains("Sealed"));
    assert!(sealed.exists(), "container file should exist after seal");

    let verify = run(&["verify", path_str(&sealed)])?;
    assert!(
        verify.status.success(),
        "verify command failed: {}",
        String::from_utf8_lossy(&verify.stderr)
    );
    assert!(String::from_utf8(verify.stdout)?.starts_with("OK"));

    let info = run(&["info", path_str(&sealed)])?;
    let info_stdout = String::from_utf8(info.stdout)?;
    assert!(info_stdout.contains("Cipher: xchacha20-poly1305"));
    assert!(info_stdout.contains("Iterations: 1"));
    assert!(info_stdout.contains("Integrity: OK"));

    let open = strongbox_command()
        .env("STRONGBOX_PASSPHRASE", "open sesame")
        .args(["open", path_str(&sealed), path_str(&restored)])
        .output()?;
    assert!(
        open.status.success(),
        "open command failed: {}",
        String::from_utf8_lossy(&open.stderr)
    );

    let expected: serde_json::Value = serde_json::from_str(document)?;
    let actual: serde_json::Value = serde_json::from_str(&fs::read_to_string(&restored)?)?;
    assert_eq!(actual, expected);
    Ok(())
}

#[test]
fn wrong_passphrase_fails_without_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = write_fast_config(dir.path())?;
    let input = dir.path().join("data.json");
    let sealed = dir.path().join("data.sbx");
    let restored = dir.path().join("data.out.json");
    fs::write(&input, "[1, 2, 3]")?;

    let seal = run(&[
        "--config",
        path_str(&config),
        "seal",
        "--passphrase",
        "right",
        path_str(&input),
        path_str(&sealed),
    ])?;
    assert!(seal.status.success());

    let open = run(&[
        "open",
        "--passphrase",
        "wrong",
        path_str(&sealed),
        path_str(&restored),
    ])?;
    assert!(!open.status.success());
    assert!(String::from_utf8(open.stderr)?.contains("unreadable"));
    assert!(!restored.exists());
    Ok(())
}

#[test]
fn tampered_container_fails_verify() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = write_fast_config(dir.path())?;
    let input = dir.path().join("data.json");
    let sealed = dir.path().join("data.sbx");
    fs::write(&input, r#"{"k": "v"}"#)?;

    let seal = run(&[
        "--config",
        path_str(&config),
        "seal",
        "--passphrase",
        "pw",
        path_str(&input),
        path_str(&sealed),
    ])?;
    assert!(seal.status.success());

    let mut container: serde_json::Value = serde_json::from_str(&fs::read_to_string(&sealed)?)?;
    let tampered = format!("AAAA{}", container["encrypted"].as_str().unwrap_or_default());
    container["encrypted"] = serde_json::Value::String(tampered);
    fs::write(&sealed, serde_json::to_string_pretty(&container)?)?;

    let verify = run(&["verify", path_str(&sealed)])?;
    assert!(!verify.status.success());
    assert!(String::from_utf8(verify.stderr)?.contains("Integrity check failed"));
    Ok(())
}

#[test]
fn seal_without_passphrase_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("data.json");
    let sealed = dir.path().join("data.sbx");
    fs::write(&input, "{}")?;

    let seal = run(&["seal", path_str(&input), path_str(&sealed)])?;
    assert!(!seal.status.success());
    assert!(String::from_utf8(seal.stderr)?.contains("Passphrase required"));
    assert!(!sealed.exists());
    Ok(())
}

#[test]
fn malformed_config_is_reported() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[container]\ncipher = \"rot13\"\n")?;

    let output = run(&["--config", path_str(&config), "info", "missing.sbx"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Configuration error"));
    Ok(())
}
