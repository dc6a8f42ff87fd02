//! Directory walking -- turns a directory argument into scan sources
//!
//! Only direct children are inspected unless `recursive` is set. `.git` is
//! never descended into; when `skip_git` is off, a directory that contains
//! `.git` is itself reported as a git source.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use vulnscan_core::error::ScanError;

use crate::detect::{LockfileDetector, SbomDetector};
use crate::resolve::ScanSource;

const GIT_DIR: &str = ".git";

/// Walks one directory tree and collects lockfile, SBOM and git sources.
pub struct DirectoryWalker<'a> {
    lockfiles: &'a LockfileDetector,
    sboms: &'a SbomDetector,
    recursive: bool,
    skip_git: bool,
    max_file_size: usize,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(lockfiles: &'a LockfileDetector, sboms: &'a SbomDetector) -> Self {
        Self {
            lockfiles,
            sboms,
            recursive: false,
            skip_git: false,
            max_file_size: usize::MAX,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn skip_git(mut self, skip_git: bool) -> Self {
        self.skip_git = skip_git;
        self
    }

    pub fn max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Walk `root` depth-first, entries sorted by name within each directory.
    ///
    /// Failing to read `root` itself is an error; unreadable entries and
    /// subdirectories below it are skipped with a warning.
    pub fn walk(&self, root: &Path) -> Result<Vec<ScanSource>, ScanError> {
        let walker = if self.recursive {
            WalkDir::new(root)
        } else {
            WalkDir::new(root).max_depth(1)
        };
        let mut entries = walker
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        let mut sources = Vec::new();
        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Io {
                        path: root.display().to_string(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    warn!(error = %e, "failed to read directory entry");
                    continue;
                }
            };

            if entry.depth() > 0 && entry.file_name() == GIT_DIR {
                // the marker's contents are never scanned
                if entry.file_type().is_dir() {
                    entries.skip_current_dir();
                }
                if !self.skip_git {
                    let repo = entry.path().parent().unwrap_or(root);
                    debug!(repo = %repo.display(), "found git repository");
                    sources.push(ScanSource::git(repo));
                }
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type();
            let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
            if !is_file {
                continue;
            }

            let source = if let Some(ecosystem) = self.lockfiles.detect_ecosystem(path) {
                ScanSource::lockfile(path, ecosystem)
            } else if let Some(format) = self.sboms.detect_format(path) {
                ScanSource::sbom(path, format)
            } else {
                continue;
            };

            if !self.within_size_limit(path) {
                continue;
            }

            debug!(path = %path.display(), kind = %source.source.kind, "found scan source");
            sources.push(source);
        }
        Ok(sources)
    }

    fn within_size_limit(&self, path: &Path) -> bool {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file metadata");
                return false;
            }
        };

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.max_file_size {
            warn!(
                path = %path.display(),
                size = file_size,
                max = self.max_file_size,
                "file too large, skipping"
            );
            return false;
        }
        true
    }
}
