//! Source resolution -- turns a [`ScanRequest`] into concrete scan targets
//!
//! Resolution order follows the request: explicit lockfiles, explicit SBOMs,
//! docker images, then directories. Explicit files must exist and be
//! recognizable; directories must exist and are walked with
//! [`DirectoryWalker`].

use std::path::Path;

use tracing::debug;

use vulnscan_core::error::ScanError;
use vulnscan_core::request::ScanRequest;
use vulnscan_core::types::{Source, SourceKind};

use crate::detect::{LockfileDetector, SbomDetector, SbomFormat};
use crate::walk::DirectoryWalker;

/// A resolved scan target handed to the [`PackageMatcher`](crate::PackageMatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSource {
    pub source: Source,
    /// Ecosystem for lockfiles
    pub ecosystem: Option<String>,
    /// Document format for SBOMs
    pub sbom_format: Option<SbomFormat>,
}

impl ScanSource {
    pub fn lockfile(path: &Path, ecosystem: &str) -> Self {
        Self {
            source: Source::new(SourceKind::Lockfile, path.display().to_string()),
            ecosystem: Some(ecosystem.to_owned()),
            sbom_format: None,
        }
    }

    pub fn sbom(path: &Path, format: SbomFormat) -> Self {
        Self {
            source: Source::new(SourceKind::Sbom, path.display().to_string()),
            ecosystem: None,
            sbom_format: Some(format),
        }
    }

    pub fn docker(image: &str) -> Self {
        Self {
            source: Source::new(SourceKind::Docker, image),
            ecosystem: None,
            sbom_format: None,
        }
    }

    pub fn git(repo: &Path) -> Self {
        Self {
            source: Source::new(SourceKind::Git, repo.display().to_string()),
            ecosystem: None,
            sbom_format: None,
        }
    }
}

/// Resolves requests against the local filesystem.
pub struct SourceResolver {
    lockfiles: LockfileDetector,
    sboms: SbomDetector,
    max_file_size: usize,
}

impl SourceResolver {
    pub fn new(max_file_size: usize) -> Self {
        Self {
            lockfiles: LockfileDetector::new(),
            sboms: SbomDetector::new(),
            max_file_size,
        }
    }

    /// Resolve every target in `request`.
    ///
    /// Returns an empty list for a request without targets, and for
    /// directories that contain nothing scannable.
    pub fn resolve(&self, request: &ScanRequest) -> Result<Vec<ScanSource>, ScanError> {
        let mut sources = Vec::new();

        for path in request.lockfile_paths() {
            sources.push(self.resolve_lockfile(path)?);
        }

        for path in request.sbom_paths() {
            sources.push(self.resolve_sbom(path)?);
        }

        for image in request.docker_images() {
            if image.trim().is_empty() {
                return Err(ScanError::UnsupportedSource {
                    path: image.clone(),
                    reason: "empty image name".to_owned(),
                });
            }
            sources.push(ScanSource::docker(image));
        }

        let walker = DirectoryWalker::new(&self.lockfiles, &self.sboms)
            .recursive(request.recursive())
            .skip_git(request.skip_git())
            .max_file_size(self.max_file_size);

        for dir in request.directory_paths() {
            if !dir.is_dir() {
                return Err(ScanError::Io {
                    path: dir.display().to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "not a directory",
                    ),
                });
            }
            debug!(dir = %dir.display(), recursive = request.recursive(), "scanning directory");
            sources.extend(walker.walk(dir)?);
        }

        Ok(sources)
    }

    fn resolve_lockfile(&self, path: &Path) -> Result<ScanSource, ScanError> {
        self.check_file(path)?;
        let ecosystem =
            self.lockfiles
                .detect_ecosystem(path)
                .ok_or_else(|| ScanError::UnsupportedSource {
                    path: path.display().to_string(),
                    reason: "unrecognized lockfile name".to_owned(),
                })?;
        Ok(ScanSource::lockfile(path, ecosystem))
    }

    fn resolve_sbom(&self, path: &Path) -> Result<ScanSource, ScanError> {
        self.check_file(path)?;
        let format = self
            .sboms
            .detect_format(path)
            .ok_or_else(|| ScanError::UnsupportedSource {
                path: path.display().to_string(),
                reason: "could not determine SBOM format from file name".to_owned(),
            })?;
        Ok(ScanSource::sbom(path, format))
    }

    /// Explicit files must exist, be regular files and fit the size limit.
    fn check_file(&self, path: &Path) -> Result<(), ScanError> {
        let metadata = std::fs::metadata(path).map_err(|e| ScanError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        if !metadata.is_file() {
            return Err(ScanError::UnsupportedSource {
                path: path.display().to_string(),
                reason: "not a regular file".to_owned(),
            });
        }

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.max_file_size {
            return Err(ScanError::FileTooBig {
                path: path.display().to_string(),
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}
