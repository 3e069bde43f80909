//! Validation pipeline: preconditions → extension → consistency → content-type → size.
//!
//! Checks run in that fixed order, skipping layers that were not selected, and the
//! first failing check ends the run. When both the consistency and the content-type
//! allow-list layers are selected, the allow-list is matched against the content-type
//! the extension implies rather than the one the client declared, and the standalone
//! allow-list check is skipped.

use filebarrier_core::{
    BarrierError, CheckLayer, ErrorKind, LayerSet, UploadedFile, ValidationOutcome,
    ValidationRequest,
};

use crate::checks::{
    check_content_type_allowed, check_content_type_consistency, check_extension,
    check_file_size, CheckFailure,
};
use crate::preconditions::check_preconditions;

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every selected check passed.
    Passed,
    /// A check found the file in violation of the policy.
    Rejected { kind: ErrorKind, message: String },
    /// A check could not be evaluated.
    Faulted { message: String },
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Project the verdict into the structured result shape. Faults are
    /// classified as [`ErrorKind::Unknown`].
    pub fn into_outcome(self) -> ValidationOutcome {
        match self {
            Verdict::Passed => ValidationOutcome::allowed(),
            Verdict::Rejected { kind, message } => ValidationOutcome::rejected(kind, message),
            Verdict::Faulted { message } => {
                ValidationOutcome::rejected(ErrorKind::Unknown, message)
            }
        }
    }
}

/// Run the pipeline for one request.
///
/// Argument faults (missing file, no layers, missing policy inputs for the
/// selected layers) are returned as `Err`; every other result is a [`Verdict`].
pub fn run(request: &ValidationRequest<'_>) -> Result<Verdict, BarrierError> {
    let layers = LayerSet::from_layers(request.layers);
    let file = check_preconditions(request, &layers)?;

    tracing::trace!(
        file_name = ?file.name(),
        checks = ?layers.selected_checks().collect::<Vec<_>>(),
        "Validating file"
    );

    let verdict = match evaluate(file, request, &layers) {
        Ok(()) => Verdict::Passed,
        Err(CheckFailure::Rejected { kind, message }) => {
            tracing::debug!(
                file_name = ?file.name(),
                error_kind = %kind,
                message = %message,
                "File rejected"
            );
            Verdict::Rejected { kind, message }
        }
        Err(CheckFailure::Fault(err)) => {
            tracing::warn!(
                file_name = ?file.name(),
                error = %err,
                "File validation faulted"
            );
            Verdict::Faulted {
                message: err.to_string(),
            }
        }
    };

    Ok(verdict)
}

fn evaluate(
    file: &dyn UploadedFile,
    request: &ValidationRequest<'_>,
    layers: &LayerSet,
) -> Result<(), CheckFailure> {
    if layers.is_selected(CheckLayer::ExtensionAllowlist) {
        check_extension(file.name(), request.allowed_extensions)?;
    }

    let mut content_type_checked = false;

    if layers.is_selected(CheckLayer::ContentTypeToExtensionConsistency) {
        let expected = check_content_type_consistency(file.name(), file.content_type())?;

        if layers.is_selected(CheckLayer::ContentTypeAllowlist) {
            check_content_type_allowed(expected, request.allowed_content_types)?;
            content_type_checked = true;
        }
    }

    if layers.is_selected(CheckLayer::ContentTypeAllowlist) && !content_type_checked {
        let declared = file
            .content_type()
            .ok_or_else(|| anyhow::anyhow!("File has no declared content-type to check"))?;
        check_content_type_allowed(declared, request.allowed_content_types)?;
    }

    if layers.is_selected(CheckLayer::SizeCeiling) {
        check_file_size(file.byte_length(), request.max_single_file_size)?;
    }

    Ok(())
}
