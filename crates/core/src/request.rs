//! Scan request -- the immutable description of what to scan
//!
//! A [`ScanRequest`] is built once per invocation through
//! [`ScanRequestBuilder`] and only read afterwards. Paths are kept exactly as
//! the user supplied them: no normalization, no deduplication.
//!
//! ```
//! use vulnscan_core::ScanRequestBuilder;
//!
//! let request = ScanRequestBuilder::new()
//!     .lockfile_paths(vec!["Cargo.lock".into()])
//!     .recursive(true)
//!     .build();
//! assert!(request.has_targets());
//! ```

use std::path::{Path, PathBuf};

/// What to scan and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    lockfile_paths: Vec<PathBuf>,
    sbom_paths: Vec<PathBuf>,
    docker_images: Vec<String>,
    directory_paths: Vec<PathBuf>,
    recursive: bool,
    skip_git: bool,
    config_override: Option<PathBuf>,
}

impl ScanRequest {
    pub fn lockfile_paths(&self) -> &[PathBuf] {
        &self.lockfile_paths
    }

    pub fn sbom_paths(&self) -> &[PathBuf] {
        &self.sbom_paths
    }

    pub fn docker_images(&self) -> &[String] {
        &self.docker_images
    }

    pub fn directory_paths(&self) -> &[PathBuf] {
        &self.directory_paths
    }

    /// Descend into subdirectories of `directory_paths`.
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Leave version-control data out of directory scans.
    pub fn skip_git(&self) -> bool {
        self.skip_git
    }

    /// Config file that replaces per-directory config lookup.
    pub fn config_override(&self) -> Option<&Path> {
        self.config_override.as_deref()
    }

    /// Whether any target set is non-empty.
    ///
    /// An empty request is still valid; the orchestrator reports it as
    /// [`ScanError::NoSourcesFound`](crate::ScanError::NoSourcesFound).
    pub fn has_targets(&self) -> bool {
        !self.lockfile_paths.is_empty()
            || !self.sbom_paths.is_empty()
            || !self.docker_images.is_empty()
            || !self.directory_paths.is_empty()
    }
}

/// Builder for [`ScanRequest`].
#[derive(Debug, Default)]
pub struct ScanRequestBuilder {
    request: ScanRequest,
}

impl ScanRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lockfile_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.request.lockfile_paths = paths;
        self
    }

    pub fn sbom_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.request.sbom_paths = paths;
        self
    }

    pub fn docker_images(mut self, images: Vec<String>) -> Self {
        self.request.docker_images = images;
        self
    }

    pub fn directory_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.request.directory_paths = paths;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.request.recursive = recursive;
        self
    }

    pub fn skip_git(mut self, skip_git: bool) -> Self {
        self.request.skip_git = skip_git;
        self
    }

    pub fn config_override(mut self, path: Option<PathBuf>) -> Self {
        self.request.config_override = path;
        self
    }

    pub fn build(self) -> ScanRequest {
        self.request
    }
}
