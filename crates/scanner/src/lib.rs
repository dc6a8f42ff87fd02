//! Local scan orchestrator for vulnscan.
//!
//! # Module Structure
//!
//! - [`config`]: Orchestrator settings and the `vulnscan.toml` ignore file
//! - [`detect`]: Lockfile and SBOM file-name detection
//! - [`walk`]: Directory walking (recursion, `.git` handling)
//! - [`resolve`]: Turns a `ScanRequest` into concrete `ScanSource`s
//! - [`engine`]: `PackageMatcher` seam to the external vulnerability engine
//! - [`orchestrator`]: `LocalOrchestrator`, the `ScanOrchestrator` implementation
//!
//! # Architecture
//!
//! ```text
//! ScanRequest --> SourceResolver --> Vec<ScanSource>
//!                      |                   |
//!               (detect + walk)     PackageMatcher::inspect
//!                                          |
//!                                  ConfigManager (ignore list)
//!                                          |
//!                                ScanResult + Option<ScanError>
//! ```

pub mod config;
pub mod detect;
pub mod engine;
pub mod orchestrator;
pub mod resolve;
pub mod walk;

// --- Public API Re-exports ---

pub use config::{ConfigManager, IgnoreEntry, OrchestratorSettings, ScanConfig};
pub use detect::{LockfileDetector, SbomDetector, SbomFormat};
pub use engine::{NullMatcher, PackageMatcher};
pub use orchestrator::{LocalOrchestrator, LocalOrchestratorBuilder};
pub use resolve::{ScanSource, SourceResolver};
