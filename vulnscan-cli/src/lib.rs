//! vulnscan command-line entry layer
//!
//! Turns raw arguments into a [`ScanRequest`](vulnscan_core::ScanRequest),
//! runs a [`ScanOrchestrator`](vulnscan_core::ScanOrchestrator), renders the
//! result and maps the terminating error to a process exit status.
//!
//! ```text
//! args --> translate --> ScanRequest --> orchestrator.scan()
//!              |                              |
//!              v                              v
//!          CliError                 (ScanResult, ScanError?)
//!              |                              |
//!              +------> Dispatcher <----------+
//!                           |
//!                  OutputSink (stdout/stderr) + exit status
//! ```

pub mod cli;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod output;
pub mod translate;
pub mod version;

pub use dispatch::{Dispatcher, run};
pub use error::{CliError, TerminationKind};
pub use output::{OutputMode, OutputSink, Reporter};

/// Process exit statuses.
pub mod exit_codes {
    /// Scan completed without findings (also help and version).
    pub const SUCCESS: i32 = 0;
    /// Scan completed and found vulnerabilities.
    pub const VULNERABILITIES_FOUND: i32 = 1;
    /// Invalid arguments, scan failure or output failure.
    pub const GENERIC_FAILURE: i32 = 127;
    /// Nothing in the request resolved to a scan target.
    pub const NO_SOURCES: i32 = 128;
}
