//! CSV ledger persistence for buildsize.
//!
//! Reports are appended to a CSV file, one row per invocation, so build
//! sizes can be tracked over time. The header is created exactly once and
//! the file is never truncated or rewritten afterwards.
//!
//! ```rust,no_run
//! # async fn run(report: buildsize_core::BuildSizeReport) -> Result<(), buildsize_core::BuildSizeError> {
//! use buildsize_export::CsvRecorder;
//!
//! CsvRecorder::new("build-sizes.csv").append(&report).await?;
//! # Ok(())
//! # }
//! ```

mod csv;
mod manifest;

pub use csv::{CsvRecorder, TIMESTAMP_FORMAT, UNITS_COLUMN, append_report, data_row, header_row};
pub use manifest::{MANIFEST_FILE, read_version};
