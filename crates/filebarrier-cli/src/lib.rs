//! Shared pieces of the `filebarrier` command-line front end.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use filebarrier_core::{BarrierPolicy, CheckLayer, FileDescriptor, ValidationOutcome};
use filebarrier_validator::FileBarrier;
use serde::Serialize;

/// Policy overrides accepted by every validating subcommand.
///
/// Flags left unset fall back to the policy loaded from the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Comma separated allowed extensions, e.g. "txt,pdf,png"
    #[arg(long, value_name = "LIST")]
    pub allowed_extensions: Option<String>,

    /// Comma separated allowed content-types, e.g. "text/plain,image/png"
    #[arg(long, value_name = "LIST")]
    pub allowed_content_types: Option<String>,

    /// Maximum accepted file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Check layer to run (repeatable): extension_allowlist,
    /// content_type_to_extension_consistency, content_type_allowlist, size_ceiling, all_layers
    #[arg(long = "layer", value_name = "LAYER")]
    pub layers: Vec<CheckLayer>,
}

impl PolicyArgs {
    /// Apply the overrides on top of `base`.
    pub fn resolve(&self, base: BarrierPolicy) -> BarrierPolicy {
        let mut policy = base;

        if let Some(allowed_extensions) = &self.allowed_extensions {
            policy.allowed_extensions = allowed_extensions.clone();
        }
        if let Some(allowed_content_types) = &self.allowed_content_types {
            policy.allowed_content_types = allowed_content_types.clone();
        }
        if let Some(max_size) = self.max_size {
            policy.max_file_size_bytes = Some(max_size);
        }
        if !self.layers.is_empty() {
            policy.layers = self.layers.clone();
        }

        policy
    }
}

/// Outcome for one checked file, as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
}

/// Describe a file on disk the way an upload would: its file name and length, with
/// the content-type supplied by the caller since file bytes are never inspected.
pub fn describe_path(path: &Path, content_type: Option<&str>) -> anyhow::Result<FileDescriptor> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if !metadata.is_file() {
        return Err(anyhow::anyhow!("{} is not a regular file", path.display()));
    }

    Ok(FileDescriptor {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        content_type: content_type.map(str::to_string),
        byte_length: Some(metadata.len()),
    })
}

/// Check every path against the barrier, in order.
pub fn check_paths(
    barrier: &FileBarrier,
    paths: &[impl AsRef<Path>],
    content_type: Option<&str>,
) -> anyhow::Result<Vec<FileReport>> {
    paths
        .iter()
        .map(|path| -> anyhow::Result<FileReport> {
            let path = path.as_ref();
            let file = describe_path(path, content_type)?;
            let outcome = barrier
                .check(&file)
                .context("Upload policy is misconfigured")?;
            tracing::info!(
                file = %path.display(),
                allowed = outcome.is_allowed(),
                "Checked file"
            );
            Ok(FileReport {
                file: path.display().to_string(),
                outcome,
            })
        })
        .collect()
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
