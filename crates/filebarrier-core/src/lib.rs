//! FileBarrier Core Library
//!
//! This crate provides the domain models, error types, MIME lookup table and policy
//! configuration shared by the validator and the command-line front end.

pub mod config;
pub mod error;
pub mod mime;
pub mod models;

// Re-export commonly used types
pub use config::BarrierPolicy;
pub use error::{BarrierError, ErrorMetadata, LogLevel};
pub use models::{
    CheckLayer, ErrorKind, FileDescriptor, LayerSet, UploadedFile, ValidationOutcome,
    ValidationRequest,
};
