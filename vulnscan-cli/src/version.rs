//! Build metadata printed by `--version`

use std::fmt;

/// Version, commit and build date of the running binary.
///
/// Commit and date come from `VULNSCAN_COMMIT` / `VULNSCAN_BUILD_DATE` at
/// compile time and read `n/a` when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("VULNSCAN_COMMIT").unwrap_or("n/a"),
            date: option_env!("VULNSCAN_BUILD_DATE").unwrap_or("n/a"),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vulnscan version: {}", self.version)?;
        writeln!(f, "commit: {}", self.commit)?;
        writeln!(f, "built at: {}", self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_three_lines() {
        let info = VersionInfo {
            version: "1.2.3",
            commit: "abc123",
            date: "2024-01-01T00:00:00Z",
        };
        assert_eq!(
            info.to_string(),
            "vulnscan version: 1.2.3\ncommit: abc123\nbuilt at: 2024-01-01T00:00:00Z\n"
        );
    }

    #[test]
    fn current_uses_package_version() {
        let info = VersionInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.commit.is_empty());
        assert!(!info.date.is_empty());
    }
}
