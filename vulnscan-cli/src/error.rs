//! CLI-specific error types and exit code mapping

use vulnscan_core::error::{ScanError, ScanErrorKind};

use crate::exit_codes;
use crate::output::OutputError;

/// Diagnostic printed when nothing in the request resolved to a scan target.
pub const NO_SOURCES_MESSAGE: &str = "No package sources found, --help for usage information.";

/// Classification of the error that ended an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationKind {
    /// Arguments were rejected before any scan ran.
    Validation,
    /// The scan found vulnerabilities.
    VulnerabilitiesFound,
    /// No scan targets could be resolved.
    NoSourcesFound,
    /// Any other scan or output failure.
    Failure,
}

/// Error that terminates a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Malformed arguments (unknown flag, unsupported format, ...).
    #[error("{0}")]
    Validation(String),

    /// The orchestrator's terminating error.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The result could not be rendered.
    #[error("failed to write output: {0}")]
    Output(#[from] OutputError),
}

impl CliError {
    pub fn kind(&self) -> TerminationKind {
        match self {
            Self::Validation(_) => TerminationKind::Validation,
            Self::Scan(e) => match e.kind() {
                ScanErrorKind::VulnerabilitiesFound => TerminationKind::VulnerabilitiesFound,
                ScanErrorKind::NoSourcesFound => TerminationKind::NoSourcesFound,
                ScanErrorKind::Failure => TerminationKind::Failure,
            },
            Self::Output(_) => TerminationKind::Failure,
        }
    }

    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                    |
    /// |------|--------------------------------------------|
    /// | 1    | Vulnerabilities found                      |
    /// | 127  | Validation, scan or output failure         |
    /// | 128  | No package sources found                   |
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            TerminationKind::VulnerabilitiesFound => exit_codes::VULNERABILITIES_FOUND,
            TerminationKind::NoSourcesFound => exit_codes::NO_SOURCES,
            TerminationKind::Validation | TerminationKind::Failure => {
                exit_codes::GENERIC_FAILURE
            }
        }
    }

    /// Text for the error channel, if this kind prints one.
    pub fn diagnostic(&self) -> Option<String> {
        match self.kind() {
            TerminationKind::VulnerabilitiesFound => None,
            TerminationKind::NoSourcesFound => Some(NO_SOURCES_MESSAGE.to_owned()),
            TerminationKind::Validation | TerminationKind::Failure => Some(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulnscan_core::error::ConfigError;

    fn io_output_error() -> CliError {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        CliError::Output(OutputError::Io(io))
    }

    #[test]
    fn test_exit_code_vulnerabilities_found() {
        let err = CliError::from(ScanError::VulnerabilitiesFound { count: 3 });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.kind(), TerminationKind::VulnerabilitiesFound);
        assert!(err.diagnostic().is_none(), "findings print no diagnostic");
    }

    #[test]
    fn test_exit_code_no_sources() {
        let err = CliError::from(ScanError::NoSourcesFound);
        assert_eq!(err.exit_code(), 128);
        assert_eq!(err.diagnostic().as_deref(), Some(NO_SOURCES_MESSAGE));
    }

    #[test]
    fn test_exit_code_validation() {
        let err = CliError::Validation("unexpected argument '--bogus'".to_owned());
        assert_eq!(err.exit_code(), 127);
        assert_eq!(
            err.diagnostic().as_deref(),
            Some("unexpected argument '--bogus'")
        );
    }

    #[test]
    fn test_exit_code_scan_failures() {
        let errors = [
            ScanError::Engine("database unavailable".to_owned()),
            ScanError::Config(ConfigError::FileNotFound {
                path: "vulnscan.toml".to_owned(),
            }),
            ScanError::UnsupportedSource {
                path: "deps.txt".to_owned(),
                reason: "unrecognized lockfile name".to_owned(),
            },
        ];
        for e in errors {
            let err = CliError::from(e);
            assert_eq!(err.exit_code(), 127, "{err}");
            assert_eq!(err.kind(), TerminationKind::Failure);
        }
    }

    #[test]
    fn test_scan_failure_diagnostic_is_cause_text() {
        let err = CliError::from(ScanError::Engine("database unavailable".to_owned()));
        assert_eq!(
            err.diagnostic().as_deref(),
            Some("engine error: database unavailable")
        );
    }

    #[test]
    fn test_output_failure() {
        let err = io_output_error();
        assert_eq!(err.exit_code(), 127);
        assert_eq!(err.to_string(), "failed to write output: pipe closed");
    }
}
