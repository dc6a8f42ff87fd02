//! Error types -- the terminating conditions of a scan
//!
//! [`ScanError`] is what a [`ScanOrchestrator`](crate::ScanOrchestrator) hands
//! back next to its result. Two variants are not failures of the tool itself
//! but outcomes the caller must act on (`VulnerabilitiesFound`,
//! `NoSourcesFound`); everything else is a generic failure wrapping its cause.
//! Callers classify with [`ScanError::kind`] instead of comparing values.

/// Classification of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    /// The scan completed and reported one or more vulnerabilities.
    VulnerabilitiesFound,
    /// The request contained no resolvable scan targets.
    NoSourcesFound,
    /// Any other failure (I/O, config, unsupported input, engine error).
    Failure,
}

/// Scan orchestration error
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scan completed and found vulnerabilities.
    #[error("vulnerabilities found: {count}")]
    VulnerabilitiesFound {
        /// Number of vulnerabilities left after ignore filtering
        count: usize,
    },

    /// Nothing in the request resolved to a scan target.
    #[error("no package sources found")]
    NoSourcesFound,

    /// Configuration file could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// File I/O error on a scan target.
    #[error("io error: {path}: {source}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The target exists but is not something the scanner understands.
    #[error("unsupported source: {path}: {reason}")]
    UnsupportedSource {
        /// Path or identifier of the target
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Target exceeds the configured size limit.
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// File path
        path: String,
        /// Actual size in bytes
        size: usize,
        /// Maximum allowed size in bytes
        max: usize,
    },

    /// The package matcher failed on a source.
    #[error("engine error: {0}")]
    Engine(String),
}

impl ScanError {
    /// Classify this error.
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            Self::VulnerabilitiesFound { .. } => ScanErrorKind::VulnerabilitiesFound,
            Self::NoSourcesFound => ScanErrorKind::NoSourcesFound,
            Self::Config(_)
            | Self::Io { .. }
            | Self::UnsupportedSource { .. }
            | Self::FileTooBig { .. }
            | Self::Engine(_) => ScanErrorKind::Failure,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape.
    #[error("failed to parse config {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    /// A setting is out of range.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
