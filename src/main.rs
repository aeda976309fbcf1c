use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use strongbox::cli::{open_file, seal_file, show_info, verify_file, RestoreOptions, SealOptions};
use strongbox::config::{LoggingConfig, StrongboxConfig};
use strongbox::{CipherSuite, Compression, HashAlgorithm, Result};
use zeroize::Zeroizing;

/// Version info from build.rs
const VERSION: &str = env!("STRONGBOX_VERSION");
const PROFILE: &str = env!("STRONGBOX_PROFILE");
const GIT_HASH: &str = env!("STRONGBOX_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "strongbox")]
#[command(author, about = "Encrypted, integrity-checked backup containers", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a JSON document into a container file
    #[command(alias = "s")]
    Seal {
        /// Passphrase used to derive the encryption key
        #[arg(long, env = "STRONGBOX_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,

        /// Input JSON file
        input: PathBuf,

        /// Output container file (overwritten if it exists)
        output: PathBuf,

        /// AEAD cipher suite
        #[arg(long, value_parser = parse_cipher)]
        cipher: Option<CipherSuite>,

        /// Hash algorithm for the integrity digest
        #[arg(long, value_parser = parse_hash)]
        digest: Option<HashAlgorithm>,

        /// Compression algorithm
        #[arg(long, value_parser = parse_compression)]
        compression: Option<Compression>,
    },

    /// Verify and decrypt a container file back to JSON
    #[command(alias = "o")]
    Open {
        /// Passphrase the container was sealed with
        #[arg(long, env = "STRONGBOX_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,

        /// Input container file
        input: PathBuf,

        /// Output JSON file
        output: PathBuf,
    },

    /// Check a container's integrity digest (no passphrase needed)
    #[command(alias = "v")]
    Verify {
        /// Container file to check
        file: PathBuf,
    },

    /// Show information about a container file
    #[command(alias = "i")]
    Info {
        /// Container file to inspect
        file: PathBuf,
    },
}

fn parse_cipher(s: &str) -> std::result::Result<CipherSuite, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_hash(s: &str) -> std::result::Result<HashAlgorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_compression(s: &str) -> std::result::Result<Compression, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(cfg: &LoggingConfig) {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.level));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for command output
    if cfg.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        registry.with(json_layer).init();
    } else {
        let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        registry.with(console_layer).init();
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<StrongboxConfig> {
    let mut config = StrongboxConfig::load(explicit)?;
    config.apply_env()?;
    Ok(config)
}

fn run(command: Commands, config: &StrongboxConfig) -> Result<()> {
    match command {
        Commands::Seal {
            passphrase,
            input,
            output,
            cipher,
            digest,
            compression,
        } => {
            let mut params = config.container_params();
            if let Some(cipher) = cipher {
                params.cipher = cipher;
            }
            if let Some(digest) = digest {
                params.digest = digest;
            }
            if let Some(compression) = compression {
                params.compression = compression;
            }

            let options = SealOptions {
                passphrase: Zeroizing::new(passphrase.unwrap_or_default()),
                params,
            };
            let container = seal_file(&input, &output, &options)?;
            println!("Sealed {} into {}", input.display(), output.display());
            println!("Hash: {}", container.hash);
            Ok(())
        }

        Commands::Open {
            passphrase,
            input,
            output,
        } => {
            let options = RestoreOptions {
                passphrase: Zeroizing::new(passphrase.unwrap_or_default()),
            };
            let written = open_file(&input, &output, &options)?;
            println!("Restored {} bytes to {}", written, output.display());
            Ok(())
        }

        Commands::Verify { file } => {
            let container = verify_file(&file)?;
            println!(
                "OK: {} ({} {})",
                file.display(),
                container.params.digest.as_str(),
                container.hash
            );
            Ok(())
        }

        Commands::Info { file } => {
            let info = show_info(&file)?;
            print!("{}", info);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("strongbox {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(stage = e.stage(), "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
