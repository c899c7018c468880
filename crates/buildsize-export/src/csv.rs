//! Append-only CSV ledger of build size reports.
//!
//! The first line of a ledger is a header written exactly once. A new ledger
//! is staged in a temporary file holding only the header and moved into
//! place without replacing an existing file, so no writer ever sees the
//! ledger without its header.
//! Every call appends one data row. Values are joined with commas and are
//! not quoted, so a file name containing a comma shifts its row's columns.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use itertools::Itertools;
use tempfile::NamedTempFile;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use buildsize_core::{BuildSizeError, BuildSizeReport, Operation};

use crate::manifest::read_version;

/// Timestamp format for the `Timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing header column describing the units.
pub const UNITS_COLUMN: &str = "(File sizes in bytes)";

/// Appends [`BuildSizeReport`]s to a CSV file.
#[derive(Debug, Clone)]
pub struct CsvRecorder {
    output: PathBuf,
    manifest_dir: Option<PathBuf>,
}

impl CsvRecorder {
    /// Create a recorder for `output`, reading the version from the working directory.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            manifest_dir: None,
        }
    }

    /// Read `package.json` from `dir` instead of the working directory.
    pub fn with_manifest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.manifest_dir = Some(dir.into());
        self
    }

    /// Append one row for `report`, writing the header first if the file is new.
    pub async fn append(&self, report: &BuildSizeReport) -> Result<(), BuildSizeError> {
        let output = std::path::absolute(&self.output)
            .map_err(|e| BuildSizeError::io(&self.output, Operation::CreateHeader, e))?;

        let version = match &self.manifest_dir {
            Some(dir) => read_version(dir).await,
            None => read_version(Path::new(".")).await,
        };
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let header = header_row(version.as_deref());
        let row = data_row(report, version.as_deref(), &timestamp);

        write_header(&output, &header).await?;
        append_row(&output, &row).await?;

        debug!(path = %output.display(), "appended build sizes to CSV");
        Ok(())
    }
}

/// Append `report` to the CSV ledger at `output_path`.
pub async fn append_report(
    report: &BuildSizeReport,
    output_path: impl Into<PathBuf>,
) -> Result<(), BuildSizeError> {
    CsvRecorder::new(output_path).append(report).await
}

/// Header line: optional `Version`, `Timestamp`, report fields, units note.
pub fn header_row(version: Option<&str>) -> String {
    version
        .map(|_| "Version")
        .into_iter()
        .chain(["Timestamp"])
        .chain(BuildSizeReport::FIELD_NAMES)
        .chain([UNITS_COLUMN])
        .join(",")
}

/// Data line matching [`header_row`] for the same `version`.
pub fn data_row(report: &BuildSizeReport, version: Option<&str>, timestamp: &str) -> String {
    version
        .map(str::to_string)
        .into_iter()
        .chain([timestamp.to_string()])
        .chain(report.field_values())
        .join(",")
}

/// Create the file with `header` unless it already exists.
async fn write_header(path: &Path, header: &str) -> Result<(), BuildSizeError> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "CSV already exists, keeping header");
        return Ok(());
    }

    let target = path.to_path_buf();
    let contents = format!("{header}\n");
    tokio::task::spawn_blocking(move || place_header(&target, &contents))
        .await
        .map_err(|e| BuildSizeError::Task {
            operation: Operation::CreateHeader,
            message: e.to_string(),
        })?
}

/// Stage `contents` next to `path` and move it there if `path` is still free.
fn place_header(path: &Path, contents: &str) -> Result<(), BuildSizeError> {
    let io_error = |e: std::io::Error| BuildSizeError::io(path, Operation::CreateHeader, e);
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
    staged.write_all(contents.as_bytes()).map_err(io_error)?;
    staged.flush().map_err(io_error)?;

    // Temp files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(io_error)?;
    }

    match staged.persist_noclobber(path) {
        Ok(_) => {
            debug!(path = %path.display(), "created CSV with header");
            Ok(())
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "CSV created concurrently, keeping header");
            Ok(())
        }
        Err(e) => Err(io_error(e.error)),
    }
}

/// Append a single line to the file.
async fn append_row(path: &Path, row: &str) -> Result<(), BuildSizeError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await
        .map_err(|e| BuildSizeError::io(path, Operation::AppendRow, e))?;

    file.write_all(format!("{row}\n").as_bytes())
        .await
        .map_err(|e| BuildSizeError::io(path, Operation::AppendRow, e))?;
    file.flush()
        .await
        .map_err(|e| BuildSizeError::io(path, Operation::AppendRow, e))
}
