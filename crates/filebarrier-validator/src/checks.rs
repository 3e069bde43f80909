//! The individual validation checks.
//!
//! Each check returns `Ok(())` when the file satisfies it, or a [`CheckFailure`]
//! describing either a policy rejection or an unexpected fault.

use filebarrier_core::{mime, ErrorKind};

/// Why a single check did not pass.
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    /// The file violates the policy.
    #[error("{message}")]
    Rejected { kind: ErrorKind, message: String },

    /// The check could not be evaluated.
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl CheckFailure {
    fn rejected(kind: ErrorKind, message: String) -> Self {
        CheckFailure::Rejected { kind, message }
    }
}

/// Extension of `file_name`: the text after its last `.`.
///
/// Empty when the name has no dot, ends with a dot, or the last dot belongs to a
/// directory component (`"v1.2/readme"`).
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => {
            let extension = &file_name[idx + 1..];
            if extension.contains(|c: char| c == '/' || c == '\\') {
                ""
            } else {
                extension
            }
        }
        None => "",
    }
}

/// Strip parameters from a declared MIME type (e.g. "text/plain; charset=utf-8" -> "text/plain").
///
/// Only used against the MIME table, whose entries never carry parameters.
/// Allow-list entries are always compared verbatim.
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Split a comma separated allow-list, failing when it holds no entries at all.
fn parse_allow_list<'a>(list: &'a str, parameter: &str) -> Result<Vec<&'a str>, CheckFailure> {
    let entries: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    if entries.is_empty() {
        return Err(anyhow::anyhow!("{} contains no entries: '{}'", parameter, list).into());
    }

    Ok(entries)
}

fn display_content_type(content_type: Option<&str>) -> &str {
    match content_type.map(str::trim) {
        Some(content_type) if !content_type.is_empty() => content_type,
        _ => "(none)",
    }
}

/// Validate the file name's extension against the allowed extensions.
///
/// Allowed entries are compared without dots or whitespace and case-insensitively,
/// so `".PNG"` in the list admits `photo.png`. An empty or extension-less name
/// never matches; an absent name has nothing to compare and passes.
pub fn check_extension(
    file_name: Option<&str>,
    allowed_extensions: &str,
) -> Result<(), CheckFailure> {
    let allowed: Vec<String> = parse_allow_list(allowed_extensions, "allowedExtensions")?
        .into_iter()
        .map(|entry| {
            entry
                .chars()
                .filter(|c| *c != '.' && !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|entry| !entry.is_empty())
        .collect();

    if allowed.is_empty() {
        return Err(anyhow::anyhow!(
            "allowedExtensions contains no extensions: '{}'",
            allowed_extensions
        )
        .into());
    }

    let Some(file_name) = file_name else {
        return Ok(());
    };
    let extension = file_extension(file_name).to_lowercase();

    if extension.is_empty() || !allowed.contains(&extension) {
        return Err(CheckFailure::rejected(
            ErrorKind::InvalidExtension,
            format!(
                "File extension of '{}' could not be found in the allowed extensions ({}).",
                file_name,
                allowed.join(",")
            ),
        ));
    }

    Ok(())
}

/// Validate that the declared content-type matches what the file extension implies.
///
/// Returns the expected content-type(s) for the extension as a comma separated
/// list, empty when the extension is unknown. An unknown extension is never a
/// mismatch.
pub fn check_content_type_consistency(
    file_name: Option<&str>,
    declared_content_type: Option<&str>,
) -> Result<&'static str, CheckFailure> {
    let extension = file_extension(file_name.unwrap_or(""));
    let expected = mime::lookup(extension);

    if expected.is_empty() {
        tracing::debug!(
            extension = %extension,
            content_type = ?declared_content_type,
            "Unknown extension, skipping Content-Type/extension cross-validation"
        );
        return Ok(expected);
    }

    let declared = declared_content_type.map(normalize_mime_type).unwrap_or("");
    if !expected
        .split(',')
        .any(|candidate| candidate.eq_ignore_ascii_case(declared))
    {
        return Err(CheckFailure::rejected(
            ErrorKind::ContentTypeExtensionMismatch,
            format!(
                "Content-type of the file name {} does not match the content-type of the given file {}.",
                expected,
                display_content_type(declared_content_type)
            ),
        ));
    }

    Ok(expected)
}

/// Validate a content-type against the allowed content-types.
///
/// `content_type` may itself be a comma separated list of equivalents, as returned
/// by the MIME lookup; the check passes when any of them is allowed. Values must be
/// equal apart from case and surrounding whitespace, parameters included.
pub fn check_content_type_allowed(
    content_type: &str,
    allowed_content_types: &str,
) -> Result<(), CheckFailure> {
    let allowed = parse_allow_list(allowed_content_types, "allowedContentTypes")?;

    let found = content_type
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| allowed.iter().any(|entry| entry.eq_ignore_ascii_case(candidate)));

    if !found {
        return Err(CheckFailure::rejected(
            ErrorKind::InvalidContentType,
            format!(
                "File content-type {} could not be found in the allowed content-types ({}).",
                display_content_type(Some(content_type)),
                allowed.join(",")
            ),
        ));
    }

    Ok(())
}

/// Validate the declared size against the ceiling. The ceiling is inclusive and an
/// unknown size always passes.
pub fn check_file_size(
    byte_length: Option<u64>,
    max_single_file_size: Option<u64>,
) -> Result<(), CheckFailure> {
    if let (Some(size), Some(max)) = (byte_length, max_single_file_size) {
        if size > max {
            return Err(CheckFailure::rejected(
                ErrorKind::FileSizeExceeded,
                format!(
                    "File size {} exceeded the maximum single file size of {} bytes.",
                    size, max
                ),
            ));
        }
    }

    Ok(())
}
