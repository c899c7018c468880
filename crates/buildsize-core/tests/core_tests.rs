use buildsize_core::{
    BUNDLE_NOT_FOUND, BuildSizeError, BuildSizeReport, CompressionAlgorithm, DiskUsage,
    FileRecord, Operation, ReportConfig,
};
use std::path::{Path, PathBuf};

fn sample_report(on_disk: DiskUsage) -> BuildSizeReport {
    BuildSizeReport {
        main_bundle_name: "main.abc123.js".to_string(),
        main_bundle_size: 1_700_000,
        main_bundle_size_gzip: 500_000,
        main_bundle_size_brotli: 420_000,
        build_size: 1_752_000,
        build_size_on_disk: on_disk,
        build_file_count: 3,
    }
}

#[test]
fn test_file_record_creation() {
    let record = FileRecord::new("styles.css", "/build/styles.css", 50_000);

    assert_eq!(record.name.as_str(), "styles.css");
    assert_eq!(record.path, PathBuf::from("/build/styles.css"));
    assert_eq!(record.size, 50_000);
    assert!(record.has_type("css"));
    assert!(record.has_type("CSS"));
    assert!(!record.has_type("js"));
}

#[test]
fn test_report_serializes_in_field_order() {
    let report = sample_report(DiskUsage::Bytes(1_760_000));
    let json = serde_json::to_string(&report).unwrap();

    let mut last = 0;
    for name in BuildSizeReport::FIELD_NAMES {
        let pos = json
            .find(&format!("\"{name}\""))
            .unwrap_or_else(|| panic!("missing field {name}"));
        assert!(pos >= last, "field {name} out of order");
        last = pos;
    }
    assert!(json.contains("\"buildSizeOnDisk\":1760000"));
}

#[test]
fn test_report_serializes_unsupported_disk_usage_as_null() {
    let report = sample_report(DiskUsage::Unsupported);
    let value = serde_json::to_value(&report).unwrap();

    assert!(value["buildSizeOnDisk"].is_null());
    assert_eq!(value["buildFileCount"], 3);
}

#[test]
fn test_report_main_bundle_sentinel() {
    let mut report = sample_report(DiskUsage::Unsupported);
    assert!(report.has_main_bundle());

    report.main_bundle_name = BUNDLE_NOT_FOUND.to_string();
    assert!(!report.has_main_bundle());
}

#[test]
fn test_report_config_defaults() {
    let config = ReportConfig::default();
    assert_eq!(config.build_path, PathBuf::from("build"));
    assert_eq!(config.bundle_type, "js");

    let config: ReportConfig = serde_json::from_str(r#"{"build_path":"dist"}"#).unwrap();
    assert_eq!(config.build_path, PathBuf::from("dist"));
    assert_eq!(config.bundle_type, "js");
    assert_eq!(config.threads, 0);
}

#[test]
fn test_error_display_and_context() {
    let err = BuildSizeError::io(
        "/build/main.js",
        Operation::Compress(CompressionAlgorithm::Gzip),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(matches!(
        err,
        BuildSizeError::Io {
            operation: Operation::Compress(CompressionAlgorithm::Gzip),
            ..
        }
    ));

    let wrapped = err.in_report("/build", "js");
    assert!(!wrapped.is_not_found());
    assert_eq!(wrapped.path(), Some(Path::new("/build/main.js")));
    assert!(wrapped.to_string().contains("bundle type `js`"));
}

#[test]
fn test_parse_error_has_no_path() {
    let err = BuildSizeError::Parse {
        command: "du -sk /build".to_string(),
        output: "oops".to_string(),
    };
    assert!(err.path().is_none());
    assert!(err.to_string().contains("du -sk /build"));
}
