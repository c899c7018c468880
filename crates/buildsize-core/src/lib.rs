//! Core types and errors for buildsize.
//!
//! This crate provides the data structures shared by the buildsize crates:
//! catalogued file records, the build size report, report configuration and
//! the error taxonomy.

mod config;
mod error;
mod record;
mod report;

pub use config::{DEFAULT_BUNDLE_TYPE, ReportConfig, ReportConfigBuilder};
pub use error::{BuildSizeError, CompressionAlgorithm, Operation};
pub use record::FileRecord;
pub use report::{BUNDLE_NOT_FOUND, BuildSizeReport, DiskUsage};
