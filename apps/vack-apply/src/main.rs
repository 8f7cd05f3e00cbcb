use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{error, info};
use vack_client::ack::apply_versioned_ack_bytes;
use vack_client::config::AckOptions;
use vack_client::persistence::{load_slot_or_default, save_slot_to_path};
use vack_client::state::VersionedSlot;
use vack_codec::wire::WireFormat;
use vack_core::AckError;

mod slot;

use slot::{KindedSlot, ValueKind};

const EXIT_FAILURE: u8 = 1;
const EXIT_VERSION_MISMATCH: u8 = 2;
const EXIT_PROTOCOL_ERROR: u8 = 3;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML options file (value key and messages)
    #[arg(long, short, env = "VACK_OPTIONS")]
    options: Option<PathBuf>,
    /// Overrides the value key from the options file
    #[arg(long)]
    value_key: Option<String>,
    /// Path of the persisted value slot
    #[arg(long, short, env = "VACK_STATE", default_value = "vack-slot.json")]
    state: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one acknowledgment to the slot
    Apply {
        /// File holding the acknowledgment; reads stdin when omitted
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        format: InputFormat,
        /// Shape a value must have to be stored
        #[arg(long, value_enum, default_value_t = ValueKind::Any)]
        value_kind: ValueKind,
    },
    /// Print the current slot
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Auto,
    Json,
    Cbor,
}

impl InputFormat {
    fn resolve(self, bytes: &[u8]) -> WireFormat {
        match self {
            Self::Auto => WireFormat::detect(bytes),
            Self::Json => WireFormat::Json,
            Self::Cbor => WireFormat::Cbor,
        }
    }
}

fn load_options(cli: &Cli) -> anyhow::Result<AckOptions> {
    let mut options = match &cli.options {
        Some(path) => AckOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => AckOptions::default(),
    };
    if let Some(key) = &cli.value_key {
        options.value_key = key.clone();
        options.validate()?;
    }
    Ok(options)
}

fn read_input(input: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("reading stdin")?;
            Ok(bytes)
        }
    }
}

fn exit_code_for(err: &AckError) -> u8 {
    match err {
        AckError::InvalidResponse(_) => EXIT_FAILURE,
        AckError::VersionMismatch(_) => EXIT_VERSION_MISMATCH,
        AckError::Protocol { .. } => EXIT_PROTOCOL_ERROR,
    }
}

/// Applies `bytes` to the slot at `state_path`.
///
/// The slot is saved whenever the acknowledgment changed it, including on a
/// version mismatch.
fn apply_to_slot(
    state_path: &Path,
    bytes: &[u8],
    format: WireFormat,
    value_kind: ValueKind,
    options: &AckOptions,
) -> anyhow::Result<Result<VersionedSlot<Value>, AckError>> {
    let mut slot: VersionedSlot<Value> = load_slot_or_default(state_path)?;
    let outcome = apply_versioned_ack_bytes(
        format,
        bytes,
        options,
        &mut KindedSlot {
            slot: &mut slot,
            kind: value_kind,
        },
    );

    match outcome {
        Ok(()) => {
            save_slot_to_path(state_path, &slot)?;
            Ok(Ok(slot))
        }
        Err(err) => {
            if err.state_applied() {
                save_slot_to_path(state_path, &slot)?;
            }
            Ok(Err(err))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Apply {
            input,
            format,
            value_kind,
        } => {
            let options = load_options(cli)?;
            let bytes = read_input(input.as_deref())?;
            let wire = format.resolve(&bytes);
            match apply_to_slot(&cli.state, &bytes, wire, *value_kind, &options)? {
                Ok(slot) => {
                    info!(version = %slot.version, "acknowledgment applied");
                    println!("applied version {}", slot.version);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    error!("{err}");
                    Ok(ExitCode::from(exit_code_for(&err)))
                }
            }
        }
        Commands::Show => {
            let slot: VersionedSlot<Value> = load_slot_or_default(&cli.state)?;
            println!("{}", serde_json::to_string_pretty(&slot)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let filter = std::env::var("VACK_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
