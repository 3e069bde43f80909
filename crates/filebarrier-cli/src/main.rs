//! FileBarrier CLI: check files against an upload policy.
//!
//! The base policy comes from FILEBARRIER_* environment variables (or a `.env`
//! file); command-line flags override individual settings.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use filebarrier_cli::{check_paths, init_tracing, print_json, FileReport, PolicyArgs};
use filebarrier_core::{mime, BarrierPolicy, FileDescriptor};
use filebarrier_validator::FileBarrier;

#[derive(Parser)]
#[command(name = "filebarrier", about = "Upload admission checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files on disk using their name and size
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Content-type the upload would declare
        #[arg(long)]
        content_type: Option<String>,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Check an upload described by its metadata alone
    Describe {
        /// File name as sent by the client
        #[arg(long)]
        name: String,
        /// Declared content-type
        #[arg(long)]
        content_type: Option<String>,
        /// Size in bytes
        #[arg(long)]
        size: Option<u64>,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Show the MIME types registered for an extension
    Lookup {
        /// Extension, with or without leading dot
        extension: String,
    },
}

fn load_barrier(overrides: &PolicyArgs) -> anyhow::Result<FileBarrier> {
    let policy = overrides.resolve(
        BarrierPolicy::from_env().context("Failed to load upload policy from environment")?,
    );
    policy.validate().context("Invalid upload policy")?;

    let barrier = FileBarrier::new(policy);
    tracing::debug!(policy = ?barrier.policy(), "Loaded upload policy");
    Ok(barrier)
}

fn exit_code(reports: &[FileReport]) -> ExitCode {
    if reports.iter().all(|report| report.outcome.is_allowed()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            files,
            content_type,
            policy,
        } => {
            let barrier = load_barrier(&policy)?;
            let reports = check_paths(&barrier, files.as_slice(), content_type.as_deref())?;
            print_json(&reports)?;
            Ok(exit_code(&reports))
        }
        Commands::Describe {
            name,
            content_type,
            size,
            policy,
        } => {
            let barrier = load_barrier(&policy)?;
            let file = FileDescriptor {
                name: Some(name.clone()),
                content_type,
                byte_length: size,
            };
            let outcome = barrier
                .check(&file)
                .context("Upload policy is misconfigured")?;
            let report = FileReport {
                file: name,
                outcome,
            };
            print_json(&report)?;
            Ok(exit_code(std::slice::from_ref(&report)))
        }
        Commands::Lookup { extension } => {
            let types = mime::lookup_all(&extension);
            print_json(&serde_json::json!({
                "extension": extension,
                "content_types": types,
            }))?;
            Ok(if types.is_empty() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
