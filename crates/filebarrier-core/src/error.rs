//! Error types module
//!
//! Two failure classes leave the validator. Policy rejections are ordinary data and
//! travel inside [`ValidationOutcome`](crate::ValidationOutcome) tagged with an
//! [`ErrorKind`]. Argument faults mean the caller misconfigured the call and are
//! returned as a [`BarrierError`] instead.
//!
//! Both implement [`ErrorMetadata`] so hosts can turn them into API error bodies.

use crate::models::ErrorKind;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like policy rejections
    Debug,
    /// Warning level - for caller misconfiguration
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_EXTENSION")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Caller misconfiguration detected before any check runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarrierError {
    /// A required input for the selected layers is absent or blank.
    /// Carries the parameter name, e.g. `"allowedExtensions"`.
    #[error("Value cannot be null or empty. (Parameter '{0}')")]
    MissingArgument(&'static str),
}

impl BarrierError {
    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            BarrierError::MissingArgument(name) => *name,
        }
    }
}

impl ErrorMetadata for BarrierError {
    fn http_status_code(&self) -> u16 {
        500
    }

    fn error_code(&self) -> &'static str {
        match self {
            BarrierError::MissingArgument(_) => "MISSING_ARGUMENT",
        }
    }

    fn client_message(&self) -> String {
        "Upload policy is misconfigured".to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Warn
    }
}

/// Static metadata for each kind: (http_status, error_code, log_level).
fn error_kind_static_metadata(kind: &ErrorKind) -> (u16, &'static str, LogLevel) {
    match kind {
        ErrorKind::InvalidExtension => (400, "INVALID_EXTENSION", LogLevel::Debug),
        ErrorKind::ContentTypeExtensionMismatch => (
            400,
            "CONTENT_TYPE_EXTENSION_MISMATCH",
            LogLevel::Debug,
        ),
        ErrorKind::InvalidContentType => (415, "INVALID_CONTENT_TYPE", LogLevel::Debug),
        ErrorKind::FileSizeExceeded => (413, "FILE_SIZE_EXCEEDED", LogLevel::Debug),
        ErrorKind::Unknown => (500, "UNKNOWN_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for ErrorKind {
    fn http_status_code(&self) -> u16 {
        error_kind_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        error_kind_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        error_kind_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            ErrorKind::InvalidExtension => "File extension is not allowed",
            ErrorKind::ContentTypeExtensionMismatch => {
                "Content type does not match the file extension"
            }
            ErrorKind::InvalidContentType => "Content type is not allowed",
            ErrorKind::FileSizeExceeded => "File exceeds the maximum allowed size",
            ErrorKind::Unknown => "File could not be validated",
        }
        .to_string()
    }
}
