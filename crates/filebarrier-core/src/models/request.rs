use super::file::UploadedFile;
use super::layer::CheckLayer;

/// Everything one validation call needs: the file and the policy to hold it against.
///
/// Built per call and borrowed for the duration of the pipeline run.
#[derive(Clone, Copy)]
pub struct ValidationRequest<'a> {
    pub file: Option<&'a dyn UploadedFile>,
    /// Comma separated, e.g. `"txt,pdf,doc,docx"`. Leading dots are optional.
    pub allowed_extensions: &'a str,
    /// Comma separated, e.g. `"text/plain,application/pdf"`.
    pub allowed_content_types: &'a str,
    /// Accepted file size in bytes.
    pub max_single_file_size: Option<u64>,
    pub layers: &'a [CheckLayer],
}

impl std::fmt::Debug for ValidationRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRequest")
            .field("file_name", &self.file.and_then(|file| file.name()))
            .field(
                "content_type",
                &self.file.and_then(|file| file.content_type()),
            )
            .field("byte_length", &self.file.and_then(|file| file.byte_length()))
            .field("allowed_extensions", &self.allowed_extensions)
            .field("allowed_content_types", &self.allowed_content_types)
            .field("max_single_file_size", &self.max_single_file_size)
            .field("layers", &self.layers)
            .finish()
    }
}
