//! Build size analysis for buildsize.
//!
//! This crate turns a build output directory into a [`BuildSizeReport`]:
//!
//! - **Catalog** every regular file and sum their sizes
//! - **Select** the main bundle, the largest file of the requested type
//! - **Compress** the main bundle in memory with gzip and brotli
//! - **Probe** the on-disk allocated size of the directory
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), buildsize_analyze::BuildSizeError> {
//! use buildsize_analyze::compute_report;
//!
//! let report = compute_report("build", "js").await?;
//! println!("{}: {} bytes ({} gzip)", report.main_bundle_name,
//!     report.main_bundle_size, report.main_bundle_size_gzip);
//! # Ok(())
//! # }
//! ```
//!
//! Use [`BuildSizeAnalyzer`] directly to supply a [`ReportConfig`] or to
//! swap the compression sizer and disk usage probe.

mod compression;
mod report;

pub use compression::{CodecSizer, CompressionSizer};
pub use report::{BuildSizeAnalyzer, compute_report};

// Re-export core types
pub use buildsize_core::{
    BUNDLE_NOT_FOUND, BuildSizeError, BuildSizeReport, CompressionAlgorithm, DiskUsage,
    ReportConfig,
};
pub use buildsize_scan::{DiskUsageProbe, DuCommandProbe, UnsupportedProbe};
