//! Shared data model for the vulnscan workspace.
//!
//! The CLI builds a [`ScanRequest`], hands it to a [`ScanOrchestrator`] and
//! renders the [`ScanResult`] it gets back. Terminating conditions travel as
//! [`ScanError`], classified by [`ScanErrorKind`].

pub mod error;
pub mod orchestrator;
pub mod request;
pub mod result;
pub mod types;

// Errors
pub use error::{ConfigError, ScanError, ScanErrorKind};

// Orchestrator seam
pub use orchestrator::{ScanOrchestrator, ScanOutcome};

// Request
pub use request::{ScanRequest, ScanRequestBuilder};

// Result
pub use result::{FindingRow, PackageReport, ScanResult, SeverityCounts, SourceResult};

// Domain types
pub use types::{Package, Severity, Source, SourceKind, Vulnerability};
