//! FileBarrier Validator
//!
//! Layered upload validation: extension allow-list, content-type/extension
//! consistency, content-type allow-list and size ceiling, evaluated in that order and
//! stopping at the first violation.
//!
//! ```
//! use filebarrier_core::{CheckLayer, ErrorKind, FileDescriptor};
//! use filebarrier_validator::UploadedFileExt;
//!
//! let file = FileDescriptor::new("test.png", "image/png", 6);
//! let outcome = file
//!     .is_allowed("png,jpg", "image/png,image/jpeg", Some(5), &[CheckLayer::AllLayers])
//!     .unwrap();
//!
//! assert!(!outcome.is_allowed());
//! assert_eq!(outcome.error_kind(), Some(ErrorKind::FileSizeExceeded));
//! ```

pub mod checks;
pub mod pipeline;
pub mod preconditions;
pub mod validator;

pub use pipeline::Verdict;
pub use validator::{is_allowed, is_file_allowed, FileBarrier, UploadedFileExt};
