//! Orchestrator trait -- the seam between the CLI and the scanning engine

use crate::error::ScanError;
use crate::request::ScanRequest;
use crate::result::ScanResult;

/// Result of [`ScanOrchestrator::scan`]: the (possibly partial) result plus
/// an optional terminating error.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub result: ScanResult,
    pub error: Option<ScanError>,
}

impl ScanOutcome {
    /// A scan that finished without a terminating condition.
    pub fn clean(result: ScanResult) -> Self {
        Self {
            result,
            error: None,
        }
    }

    /// A scan that terminated with `error` after producing `result`.
    pub fn failed(result: ScanResult, error: ScanError) -> Self {
        Self {
            result,
            error: Some(error),
        }
    }

    pub fn into_parts(self) -> (ScanResult, Option<ScanError>) {
        (self.result, self.error)
    }
}

/// Resolves a [`ScanRequest`] into findings.
///
/// Contract:
/// - `ScanError::VulnerabilitiesFound` when the scan completed with findings;
///   the result is still fully populated.
/// - `ScanError::NoSourcesFound` when nothing in the request resolves.
/// - any other `ScanError` for failures, wrapping the cause.
/// - no error on a clean scan with zero findings.
///
/// Implementations run to completion before returning.
pub trait ScanOrchestrator {
    fn scan(&self, request: &ScanRequest) -> ScanOutcome;
}
