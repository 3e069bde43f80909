use filebarrier_core::{
    BarrierError, BarrierPolicy, CheckLayer, UploadedFile, ValidationOutcome, ValidationRequest,
};

use crate::pipeline;

/// Check if the file is allowed based on the selected layers.
///
/// * `allowed_extensions` - comma separated, e.g. `"txt,pdf,doc,docx"`. Required when
///   [`CheckLayer::ExtensionAllowlist`] is selected.
/// * `allowed_content_types` - comma separated, e.g. `"text/plain,application/pdf"`.
///   Required when [`CheckLayer::ContentTypeAllowlist`] is selected.
/// * `max_single_file_size` - accepted file size in bytes. Required when
///   [`CheckLayer::SizeCeiling`] is selected.
///
/// Returns `Ok(false)` for any rejection or fault, without detail. Missing
/// required inputs are returned as [`BarrierError`].
pub fn is_file_allowed(
    file: Option<&dyn UploadedFile>,
    allowed_extensions: &str,
    allowed_content_types: &str,
    max_single_file_size: Option<u64>,
    layers: &[CheckLayer],
) -> Result<bool, BarrierError> {
    let request = ValidationRequest {
        file,
        allowed_extensions,
        allowed_content_types,
        max_single_file_size,
        layers,
    };

    Ok(pipeline::run(&request)?.is_passed())
}

/// Check if the file is allowed based on the selected layers, reporting why not.
///
/// Takes the same parameters as [`is_file_allowed`]. Rejections carry their
/// [`ErrorKind`](filebarrier_core::ErrorKind) and message; faults are reported as
/// `ErrorKind::Unknown`. Missing required inputs are returned as [`BarrierError`].
pub fn is_allowed(
    file: Option<&dyn UploadedFile>,
    allowed_extensions: &str,
    allowed_content_types: &str,
    max_single_file_size: Option<u64>,
    layers: &[CheckLayer],
) -> Result<ValidationOutcome, BarrierError> {
    let request = ValidationRequest {
        file,
        allowed_extensions,
        allowed_content_types,
        max_single_file_size,
        layers,
    };

    Ok(pipeline::run(&request)?.into_outcome())
}

/// Method-call form of [`is_file_allowed`] and [`is_allowed`] for any uploaded file.
pub trait UploadedFileExt: UploadedFile {
    fn is_file_allowed(
        &self,
        allowed_extensions: &str,
        allowed_content_types: &str,
        max_single_file_size: Option<u64>,
        layers: &[CheckLayer],
    ) -> Result<bool, BarrierError>;

    fn is_allowed(
        &self,
        allowed_extensions: &str,
        allowed_content_types: &str,
        max_single_file_size: Option<u64>,
        layers: &[CheckLayer],
    ) -> Result<ValidationOutcome, BarrierError>;
}

impl<T: UploadedFile> UploadedFileExt for T {
    fn is_file_allowed(
        &self,
        allowed_extensions: &str,
        allowed_content_types: &str,
        max_single_file_size: Option<u64>,
        layers: &[CheckLayer],
    ) -> Result<bool, BarrierError> {
        is_file_allowed(
            Some(self),
            allowed_extensions,
            allowed_content_types,
            max_single_file_size,
            layers,
        )
    }

    fn is_allowed(
        &self,
        allowed_extensions: &str,
        allowed_content_types: &str,
        max_single_file_size: Option<u64>,
        layers: &[CheckLayer],
    ) -> Result<ValidationOutcome, BarrierError> {
        is_allowed(
            Some(self),
            allowed_extensions,
            allowed_content_types,
            max_single_file_size,
            layers,
        )
    }
}

/// Validator bound to one [`BarrierPolicy`].
///
/// Cheap to clone and safe to share between threads; every check is independent.
#[derive(Debug, Clone)]
pub struct FileBarrier {
    policy: BarrierPolicy,
}

impl FileBarrier {
    pub fn new(policy: BarrierPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BarrierPolicy {
        &self.policy
    }

    /// Validate a file against the policy, reporting why it was rejected.
    pub fn check(&self, file: &dyn UploadedFile) -> Result<ValidationOutcome, BarrierError> {
        is_allowed(
            Some(file),
            &self.policy.allowed_extensions,
            &self.policy.allowed_content_types,
            self.policy.max_file_size_bytes,
            &self.policy.layers,
        )
    }

    /// Validate a file against the policy.
    pub fn permits(&self, file: &dyn UploadedFile) -> Result<bool, BarrierError> {
        is_file_allowed(
            Some(file),
            &self.policy.allowed_extensions,
            &self.policy.allowed_content_types,
            self.policy.max_file_size_bytes,
            &self.policy.layers,
        )
    }
}

impl From<BarrierPolicy> for FileBarrier {
    fn from(policy: BarrierPolicy) -> Self {
        Self::new(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filebarrier_core::{ErrorKind, FileDescriptor};

    fn test_barrier() -> FileBarrier {
        FileBarrier::new(BarrierPolicy::new(
            "jpg,png",
            "image/jpeg,image/png",
            Some(1024 * 1024),
        ))
    }

    #[test]
    fn test_barrier_permits_valid_file() {
        let file = FileDescriptor::new("photo.jpg", "image/jpeg", 512 * 1024);
        assert!(test_barrier().permits(&file).unwrap());
        assert!(test_barrier().check(&file).unwrap().is_allowed());
    }

    #[test]
    fn test_barrier_exposes_its_policy() {
        let policy = BarrierPolicy::new("png", "image/png", Some(5));
        let barrier = FileBarrier::from(policy.clone());
        assert_eq!(barrier.policy(), &policy);
    }

    #[test]
    fn test_barrier_fails_on_size() {
        let file = FileDescriptor::new("photo.jpg", "image/jpeg", 2 * 1024 * 1024);
        let outcome = test_barrier().check(&file).unwrap();
        assert_eq!(outcome.error_kind(), Some(ErrorKind::FileSizeExceeded));
        assert!(!test_barrier().permits(&file).unwrap());
    }

    #[test]
    fn test_barrier_fails_on_extension() {
        let file = FileDescriptor::new("photo.gif", "image/gif", 512);
        let outcome = test_barrier().check(&file).unwrap();
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidExtension));
    }

    #[test]
    fn test_barrier_with_restricted_layers() {
        let barrier = FileBarrier::from(
            BarrierPolicy::new("png", "", None).with_layers([CheckLayer::ExtensionAllowlist]),
        );
        let file = FileDescriptor::new("huge.png", "application/pdf", u64::MAX);
        assert!(barrier.permits(&file).unwrap());
    }

    #[test]
    fn test_barrier_misconfigured_policy_is_an_error() {
        let barrier = FileBarrier::new(BarrierPolicy::new("png", "image/png", None));
        let file = FileDescriptor::new("a.png", "image/png", 1);
        assert_eq!(
            barrier.check(&file).unwrap_err(),
            BarrierError::MissingArgument("maxSingleFileSize")
        );
        assert!(barrier.permits(&file).is_err());
    }

    #[test]
    fn test_extension_methods() {
        let file = FileDescriptor::new("test.exe", "application/x-msdownload", 1);
        assert!(!file
            .is_file_allowed("txt,pdf", "", None, &[CheckLayer::ExtensionAllowlist])
            .unwrap());
        let outcome = file
            .is_allowed("txt,pdf", "", None, &[CheckLayer::ExtensionAllowlist])
            .unwrap();
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidExtension));
    }

    #[test]
    fn test_free_functions_accept_missing_file() {
        let err = is_allowed(None, "png", "image/png", Some(1), &[CheckLayer::AllLayers])
            .unwrap_err();
        assert_eq!(err.parameter(), "file");
        assert!(is_file_allowed(None, "png", "image/png", Some(1), &[CheckLayer::AllLayers])
            .is_err());
    }
}
