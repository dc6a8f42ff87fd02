//! Scan result -- per-source packages and the vulnerabilities affecting them

use serde::{Deserialize, Serialize};

use crate::types::{Package, Severity, Source, Vulnerability};

/// Full result of one scan invocation.
///
/// Populated even when the scan terminates with an error, so partial results
/// can still be rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub results: Vec<SourceResult>,
}

/// Packages found in a single source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    pub source: Source,
    pub packages: Vec<PackageReport>,
}

/// A package and the vulnerabilities matched against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageReport {
    pub package: Package,
    pub vulnerabilities: Vec<Vulnerability>,
}

/// One vulnerability occurrence, flattened for tabular output.
#[derive(Debug, Clone, Copy)]
pub struct FindingRow<'a> {
    pub source: &'a Source,
    pub package: &'a Package,
    pub vulnerability: &'a Vulnerability,
}

/// Vulnerability counts per severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.unknown
    }
}

impl ScanResult {
    /// No sources were scanned.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn source_count(&self) -> usize {
        self.results.len()
    }

    pub fn package_count(&self) -> usize {
        self.results.iter().map(|r| r.packages.len()).sum()
    }

    pub fn vulnerability_count(&self) -> usize {
        self.rows().count()
    }

    /// Iterate every (source, package, vulnerability) triple in result order.
    pub fn rows(&self) -> impl Iterator<Item = FindingRow<'_>> {
        self.results.iter().flat_map(|result| {
            result.packages.iter().flat_map(move |report| {
                report.vulnerabilities.iter().map(move |vulnerability| FindingRow {
                    source: &result.source,
                    package: &report.package,
                    vulnerability,
                })
            })
        })
    }

    /// Collect [`rows`](Self::rows) into a `Vec`.
    pub fn flatten(&self) -> Vec<FindingRow<'_>> {
        self.rows().collect()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for row in self.rows() {
            match row.vulnerability.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}
