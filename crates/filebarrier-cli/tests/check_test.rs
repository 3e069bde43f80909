use std::io::Write;

use filebarrier_cli::{check_paths, describe_path};
use filebarrier_core::{BarrierPolicy, CheckLayer, ErrorKind};
use filebarrier_validator::FileBarrier;

fn write_file(dir: &tempfile::TempDir, name: &str, len: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&vec![b'x'; len]).unwrap();
    path
}

fn test_barrier() -> FileBarrier {
    FileBarrier::new(BarrierPolicy::new("png,pdf", "image/png,application/pdf", Some(5)))
}

#[test]
fn test_describe_path_uses_name_and_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "photo.png", 3);

    let file = describe_path(&path, Some("image/png")).unwrap();
    assert_eq!(file.name.as_deref(), Some("photo.png"));
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
    assert_eq!(file.byte_length, Some(3));
}

#[test]
fn test_describe_path_rejects_directories_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(describe_path(dir.path(), None).is_err());
    assert!(describe_path(&dir.path().join("missing.png"), None).is_err());
}

#[test]
fn test_check_paths_reports_each_file() {
    let dir = tempfile::tempdir().unwrap();
    let small = write_file(&dir, "small.png", 5);
    let large = write_file(&dir, "large.png", 6);

    let reports = check_paths(&test_barrier(), &[small, large], Some("image/png")).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports[0].outcome.is_allowed());
    assert!(!reports[1].outcome.is_allowed());
    assert_eq!(
        reports[1].outcome.error_kind(),
        Some(ErrorKind::FileSizeExceeded)
    );
    assert!(reports[1].file.ends_with("large.png"));
}

#[test]
fn test_check_paths_detects_spoofed_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "invoice.pdf", 1);

    let reports = check_paths(&test_barrier(), &[path], Some("image/png")).unwrap();
    assert_eq!(
        reports[0].outcome.error_kind(),
        Some(ErrorKind::ContentTypeExtensionMismatch)
    );
}

#[test]
fn test_check_paths_misconfigured_policy_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.png", 1);

    let barrier = FileBarrier::new(
        BarrierPolicy::new("png", "", Some(5)).with_layers([CheckLayer::ContentTypeAllowlist]),
    );
    assert!(check_paths(&barrier, &[path], Some("image/png")).is_err());
}

#[test]
fn test_reports_serialize_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.exe", 1);

    let reports = check_paths(&test_barrier(), &[path], None).unwrap();
    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[0]["allowed"], false);
    assert_eq!(json[0]["error_kind"], "invalid_extension");
}
