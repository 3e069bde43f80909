use serde::{Deserialize, Serialize};

/// The host's view of an uploaded file.
///
/// Only the metadata the client claimed is exposed; the pipeline never looks at the
/// file's bytes. Every accessor may return `None` when the host has no value.
pub trait UploadedFile {
    /// File name as sent by the client, e.g. `"report.pdf"`.
    fn name(&self) -> Option<&str>;

    /// Declared `Content-Type` of the upload.
    fn content_type(&self) -> Option<&str>;

    /// Length of the upload in bytes.
    fn byte_length(&self) -> Option<u64>;
}

impl<T: UploadedFile + ?Sized> UploadedFile for &T {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn content_type(&self) -> Option<&str> {
        (**self).content_type()
    }

    fn byte_length(&self) -> Option<u64> {
        (**self).byte_length()
    }
}

/// Plain owned implementation of [`UploadedFile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub byte_length: Option<u64>,
}

impl FileDescriptor {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        byte_length: u64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            content_type: Some(content_type.into()),
            byte_length: Some(byte_length),
        }
    }
}

impl UploadedFile for FileDescriptor {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn byte_length(&self) -> Option<u64> {
        self.byte_length
    }
}
