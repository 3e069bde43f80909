use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a file was rejected.
///
/// Exactly one kind is attached to every rejection. `Unknown` is reserved for
/// unexpected faults and never describes a policy violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidExtension,
    ContentTypeExtensionMismatch,
    InvalidContentType,
    FileSizeExceeded,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidExtension => "invalid_extension",
            ErrorKind::ContentTypeExtensionMismatch => "content_type_extension_mismatch",
            ErrorKind::InvalidContentType => "invalid_content_type",
            ErrorKind::FileSizeExceeded => "file_size_exceeded",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl FromStr for ErrorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "invalid_extension" => Ok(ErrorKind::InvalidExtension),
            "content_type_extension_mismatch" => Ok(ErrorKind::ContentTypeExtensionMismatch),
            "invalid_content_type" => Ok(ErrorKind::InvalidContentType),
            "file_size_exceeded" => Ok(ErrorKind::FileSizeExceeded),
            "unknown" => Ok(ErrorKind::Unknown),
            _ => Err(anyhow::anyhow!("Invalid error kind: {}", s)),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Structured result of running the validation pipeline.
///
/// A rejected outcome always carries an error kind; an allowed outcome carries
/// neither kind nor message. Construct through [`ValidationOutcome::allowed`] and
/// [`ValidationOutcome::rejected`] to keep that invariant.
///
/// Outcomes are serialized into responses but never read back, so there is no
/// deserialization path around the constructors:
///
/// ```compile_fail
/// let outcome: filebarrier_core::ValidationOutcome =
///     serde_json::from_str(r#"{"allowed": false}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ValidationOutcome {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            error_kind: None,
            error_message: None,
        }
    }

    pub fn rejected(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            error_kind: Some(kind),
            error_message: Some(message.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outcome_is_allowed_without_error() {
        let outcome = ValidationOutcome::default();
        assert!(outcome.is_allowed());
        assert!(outcome.error_kind().is_none());
        assert!(outcome.error_message().is_none());
    }

    #[test]
    fn test_rejected_outcome_carries_kind_and_message() {
        let outcome = ValidationOutcome::rejected(ErrorKind::FileSizeExceeded, "too big");
        assert!(!outcome.is_allowed());
        assert_eq!(outcome.error_kind(), Some(ErrorKind::FileSizeExceeded));
        assert_eq!(outcome.error_message(), Some("too big"));
    }

    #[test]
    fn test_allowed_outcome_serializes_without_error_fields() {
        let json = serde_json::to_value(ValidationOutcome::allowed()).unwrap();
        assert_eq!(json, serde_json::json!({ "allowed": true }));
    }

    #[test]
    fn test_rejected_outcome_serialization() {
        let outcome = ValidationOutcome::rejected(ErrorKind::InvalidExtension, "bad extension");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "allowed": false,
                "error_kind": "invalid_extension",
                "error_message": "bad extension",
            })
        );
    }

    #[test]
    fn test_error_kind_from_str() {
        assert_eq!(
            "file_size_exceeded".parse::<ErrorKind>().unwrap(),
            ErrorKind::FileSizeExceeded
        );
        assert!("quota_exceeded".parse::<ErrorKind>().is_err());
    }
}
