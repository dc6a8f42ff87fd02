//! Engine seam -- package extraction and vulnerability matching
//!
//! Reading lockfiles, SBOMs and images and matching the packages against an
//! advisory database happens behind [`PackageMatcher`]. This crate only
//! resolves targets and post-processes what the matcher returns.

use vulnscan_core::error::ScanError;
use vulnscan_core::result::PackageReport;

use crate::resolve::ScanSource;

/// Inspects one resolved source and reports its packages with their
/// vulnerabilities.
///
/// Failures should be wrapped as [`ScanError::Engine`] or one of the I/O
/// variants; they stop the scan.
pub trait PackageMatcher: Send + Sync {
    /// Matcher name, for logs.
    fn name(&self) -> &str;

    fn inspect(&self, source: &ScanSource) -> Result<Vec<PackageReport>, ScanError>;
}

/// Matcher used when no engine is attached: every source is accepted and
/// reported with no packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMatcher;

impl PackageMatcher for NullMatcher {
    fn name(&self) -> &str {
        "null"
    }

    fn inspect(&self, _source: &ScanSource) -> Result<Vec<PackageReport>, ScanError> {
        Ok(Vec::new())
    }
}
