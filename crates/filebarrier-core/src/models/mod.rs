//! Domain models for upload validation

pub mod file;
pub mod layer;
pub mod outcome;
pub mod request;

pub use file::{FileDescriptor, UploadedFile};
pub use layer::{CheckLayer, LayerSet};
pub use outcome::{ErrorKind, ValidationOutcome};
pub use request::ValidationRequest;
