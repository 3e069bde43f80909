//! Configuration module
//!
//! An upload policy bundles everything a validation call needs besides the file:
//! allow-lists, the size ceiling and the layers to run. Policies are usually built
//! once at startup from the environment and shared across requests.

use std::env;

use crate::models::{CheckLayer, LayerSet};

const MAX_FILE_SIZE_MB: u64 = 10;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "txt,pdf,doc,docx,xls,xlsx,csv,png,jpg,jpeg,mp4,mp3,wav,zip";
const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "text/plain,application/pdf,application/msword,\
application/vnd.openxmlformats-officedocument.wordprocessingml.document,\
application/vnd.ms-excel,\
application/vnd.openxmlformats-officedocument.spreadsheetml.sheet,\
text/csv,image/png,image/jpeg,video/mp4,audio/mpeg,audio/mp3,audio/wav,\
application/x-zip-compressed,application/zip";

/// Upload policy applied to every file checked against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarrierPolicy {
    /// Comma separated, e.g. `"txt,pdf,doc,docx"`.
    pub allowed_extensions: String,
    /// Comma separated, e.g. `"text/plain,application/pdf"`.
    pub allowed_content_types: String,
    /// Accepted file size in bytes.
    pub max_file_size_bytes: Option<u64>,
    pub layers: Vec<CheckLayer>,
}

impl Default for BarrierPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.to_string(),
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES.to_string(),
            max_file_size_bytes: Some(MAX_FILE_SIZE_MB * 1024 * 1024),
            layers: vec![CheckLayer::AllLayers],
        }
    }
}

impl BarrierPolicy {
    /// Policy running every layer with the given allow-lists and size ceiling.
    pub fn new(
        allowed_extensions: impl Into<String>,
        allowed_content_types: impl Into<String>,
        max_file_size_bytes: Option<u64>,
    ) -> Self {
        Self {
            allowed_extensions: allowed_extensions.into(),
            allowed_content_types: allowed_content_types.into(),
            max_file_size_bytes,
            layers: vec![CheckLayer::AllLayers],
        }
    }

    pub fn with_layers(mut self, layers: impl IntoIterator<Item = CheckLayer>) -> Self {
        self.layers = layers.into_iter().collect();
        self
    }

    pub fn with_max_file_size(mut self, max_file_size_bytes: u64) -> Self {
        self.max_file_size_bytes = Some(max_file_size_bytes);
        self
    }

    pub fn layer_set(&self) -> LayerSet {
        LayerSet::from_layers(&self.layers)
    }

    /// Load the policy from `FILEBARRIER_*` process environment variables.
    ///
    /// Binaries load any `.env` file once at startup, before calling this.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let allowed_extensions = env::var("FILEBARRIER_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string());

        let allowed_content_types = env::var("FILEBARRIER_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_CONTENT_TYPES.to_string());

        let max_file_size_mb = env::var("FILEBARRIER_MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("FILEBARRIER_MAX_FILE_SIZE_MB must be a valid number"))?;

        let layers = match env::var("FILEBARRIER_LAYERS") {
            Ok(value) => parse_layers(&value)?,
            Err(_) => vec![CheckLayer::AllLayers],
        };

        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("FILEBARRIER_MAX_FILE_SIZE_MB is too large"))?;

        let policy = BarrierPolicy {
            allowed_extensions,
            allowed_content_types,
            max_file_size_bytes: Some(max_file_size_bytes),
            layers,
        };
        policy.validate()?;

        Ok(policy)
    }

    /// Check the policy provides every input its own layers require.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let layers = self.layer_set();

        if layers.is_empty() {
            return Err(anyhow::anyhow!(
                "FILEBARRIER_LAYERS must name at least one check layer"
            ));
        }

        if layers.is_selected(CheckLayer::ExtensionAllowlist)
            && self.allowed_extensions.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "FILEBARRIER_ALLOWED_EXTENSIONS must be set when extension checking is enabled"
            ));
        }

        if layers.is_selected(CheckLayer::ContentTypeAllowlist)
            && self.allowed_content_types.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "FILEBARRIER_ALLOWED_CONTENT_TYPES must be set when content-type checking is enabled"
            ));
        }

        if layers.is_selected(CheckLayer::SizeCeiling) && self.max_file_size_bytes.is_none() {
            return Err(anyhow::anyhow!(
                "A maximum file size must be set when size checking is enabled"
            ));
        }

        Ok(())
    }
}

/// Parse a comma separated list of layer names, e.g. `"extensions,size"`.
pub fn parse_layers(value: &str) -> Result<Vec<CheckLayer>, anyhow::Error> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<CheckLayer>)
        .collect()
}
