use filebarrier_core::{BarrierError, CheckLayer, LayerSet, UploadedFile, ValidationRequest};

/// Verify the request carries every input its selected layers need.
///
/// Checked in a fixed order and failing on the first missing input: the file, the
/// layers, then the allowed extensions, allowed content-types and maximum size when
/// their layer is selected. A blank allow-list counts as missing.
///
/// Returns the file so callers no longer deal with its absence.
pub fn check_preconditions<'a>(
    request: &ValidationRequest<'a>,
    layers: &LayerSet,
) -> Result<&'a dyn UploadedFile, BarrierError> {
    let Some(file) = request.file else {
        return Err(BarrierError::MissingArgument("file"));
    };

    if layers.is_empty() {
        return Err(BarrierError::MissingArgument("layers"));
    }

    if layers.is_selected(CheckLayer::ExtensionAllowlist)
        && request.allowed_extensions.trim().is_empty()
    {
        return Err(BarrierError::MissingArgument("allowedExtensions"));
    }

    if layers.is_selected(CheckLayer::ContentTypeAllowlist)
        && request.allowed_content_types.trim().is_empty()
    {
        return Err(BarrierError::MissingArgument("allowedContentTypes"));
    }

    if layers.is_selected(CheckLayer::SizeCeiling) && request.max_single_file_size.is_none() {
        return Err(BarrierError::MissingArgument("maxSingleFileSize"));
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filebarrier_core::FileDescriptor;

    fn request<'a>(
        file: Option<&'a FileDescriptor>,
        allowed_extensions: &'a str,
        allowed_content_types: &'a str,
        max_single_file_size: Option<u64>,
        layers: &'a [CheckLayer],
    ) -> ValidationRequest<'a> {
        ValidationRequest {
            file: file.map(|f| f as &dyn UploadedFile),
            allowed_extensions,
            allowed_content_types,
            max_single_file_size,
            layers,
        }
    }

    fn check(request: ValidationRequest<'_>) -> Result<(), BarrierError> {
        check_preconditions(&request, &LayerSet::from_layers(request.layers)).map(|_| ())
    }

    #[test]
    fn test_missing_file() {
        let err = check(request(None, "png", "image/png", Some(5), &[CheckLayer::AllLayers]))
            .unwrap_err();
        assert_eq!(err, BarrierError::MissingArgument("file"));
    }

    #[test]
    fn test_missing_file_reported_before_missing_layers() {
        let err = check(request(None, "", "", None, &[])).unwrap_err();
        assert_eq!(err.parameter(), "file");
    }

    #[test]
    fn test_empty_layers() {
        let file = FileDescriptor::new("a.png", "image/png", 1);
        let err = check(request(Some(&file), "png", "image/png", Some(5), &[])).unwrap_err();
        assert_eq!(err.parameter(), "layers");
    }

    #[test]
    fn test_blank_allowed_extensions_with_extension_layer() {
        let file = FileDescriptor::new("a.png", "image/png", 1);
        let err = check(request(
            Some(&file),
            "   ",
            "",
            None,
            &[CheckLayer::ExtensionAllowlist],
        ))
        .unwrap_err();
        assert_eq!(err.parameter(), "allowedExtensions");
    }

    #[test]
    fn test_blank_allowed_content_types_via_all_layers() {
        let file = FileDescriptor::new("a.png", "image/png", 1);
        let err = check(request(
            Some(&file),
            "png",
            "",
            Some(5),
            &[CheckLayer::AllLayers],
        ))
        .unwrap_err();
        assert_eq!(err.parameter(), "allowedContentTypes");
    }

    #[test]
    fn test_missing_max_size_with_size_layer() {
        let file = FileDescriptor::new("a.png", "image/png", 1);
        let err = check(request(
            Some(&file),
            "",
            "",
            None,
            &[CheckLayer::SizeCeiling],
        ))
        .unwrap_err();
        assert_eq!(err.parameter(), "maxSingleFileSize");
    }

    #[test]
    fn test_inputs_for_unselected_layers_are_not_required() {
        let file = FileDescriptor::new("a.png", "image/png", 1);
        assert!(check(request(
            Some(&file),
            "",
            "",
            None,
            &[CheckLayer::ContentTypeToExtensionConsistency],
        ))
        .is_ok());
    }
}
