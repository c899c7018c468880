//! Report configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default bundle file type.
pub const DEFAULT_BUNDLE_TYPE: &str = "js";

/// Configuration for a build size report.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ReportConfig {
    /// Build directory, relative to the working directory or absolute.
    pub build_path: PathBuf,

    /// File type of the main bundle, without the leading dot.
    #[builder(default = "DEFAULT_BUNDLE_TYPE.to_string()")]
    #[serde(default = "default_bundle_type")]
    pub bundle_type: String,

    /// Number of threads for cataloguing (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_bundle_type() -> String {
    DEFAULT_BUNDLE_TYPE.to_string()
}

impl ReportConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.build_path {
            Some(ref path) if path.as_os_str().is_empty() => {
                return Err("Build path cannot be empty".to_string());
            }
            None => return Err("Build path is required".to_string()),
            _ => {}
        }
        if let Some(ref bundle_type) = self.bundle_type {
            if bundle_type.trim_start_matches('.').is_empty() {
                return Err("Bundle type cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl ReportConfig {
    /// Create a new report config builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Create a config for a build path with the default bundle type.
    pub fn new(build_path: impl Into<PathBuf>) -> Self {
        Self {
            build_path: build_path.into(),
            bundle_type: default_bundle_type(),
            threads: 0,
        }
    }

    /// Set the bundle type.
    pub fn with_bundle_type(mut self, bundle_type: impl Into<String>) -> Self {
        self.bundle_type = bundle_type.into();
        self
    }

    /// Bundle type with any leading dot removed (`.css` and `css` are equivalent).
    pub fn normalized_bundle_type(&self) -> &str {
        self.bundle_type.trim_start_matches('.')
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new("build")
    }
}
