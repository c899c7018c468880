use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn buildsize() -> Command {
    Command::new(env!("CARGO_BIN_EXE_buildsize"))
}

fn build_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    let build = temp.path().join("build");
    fs::create_dir_all(build.join("static/js")).unwrap();
    fs::write(build.join("static/js/main.js"), "console.log(1);".repeat(200)).unwrap();
    fs::write(build.join("static/js/vendor.js"), "x".repeat(100)).unwrap();
    fs::write(build.join("index.html"), "<html></html>").unwrap();
    temp
}

#[test]
fn test_json_report() {
    let temp = build_dir();

    let output = buildsize()
        .current_dir(temp.path())
        .args(["--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mainBundleName"], "main.js");
    assert_eq!(report["mainBundleSize"], 3000);
    assert_eq!(report["buildSize"], 3000 + 100 + 13);
    assert_eq!(report["buildFileCount"], 3);
    assert!(report["mainBundleSizeGzip"].as_u64().unwrap() < 3000);
}

#[test]
fn test_csv_output_appends_rows() {
    let temp = build_dir();
    let csv = temp.path().join("sizes.csv");

    for _ in 0..2 {
        let status = buildsize()
            .current_dir(temp.path())
            .args(["-p", "build", "-t", "html", "-q", "-o"])
            .arg(&csv)
            .status()
            .unwrap();
        assert!(status.success());
    }

    let contents = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Timestamp,mainBundleName,"));
    assert!(lines[1].contains(",index.html,13,"));
}

#[test]
fn test_missing_directory_fails() {
    let temp = TempDir::new().unwrap();

    let output = buildsize()
        .current_dir(temp.path())
        .arg("does-not-exist")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
