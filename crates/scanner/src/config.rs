//! Orchestrator settings and the `vulnscan.toml` ignore file
//!
//! A `vulnscan.toml` lists advisories to drop from the results:
//!
//! ```toml
//! [[IgnoredVulns]]
//! id = "GHSA-c3h9-896r-86jm"
//! reason = "only reachable from test code"
//! ```
//!
//! Without `--config`, the file is looked up next to each source (once per
//! directory). With `--config`, that one file applies to every source.
//!
//! ```
//! use vulnscan_scanner::ScanConfig;
//!
//! let config = ScanConfig::parse("[[IgnoredVulns]]\nid = \"GHSA-1\"", "inline").unwrap();
//! assert_eq!(config.ignored_vulns.len(), 1);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vulnscan_core::error::ConfigError;
use vulnscan_core::types::{Source, SourceKind, Vulnerability};

/// File name looked up next to each scanned source.
pub const CONFIG_FILE_NAME: &str = "vulnscan.toml";

const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10 MB
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// Tunables of [`LocalOrchestrator`](crate::LocalOrchestrator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Largest lockfile/SBOM accepted, in bytes
    pub max_file_size: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl OrchestratorSettings {
    /// `max_file_size` must be 1-104857600 (100MB).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            });
        }
        Ok(())
    }
}

/// Contents of a `vulnscan.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(rename = "IgnoredVulns", default)]
    pub ignored_vulns: Vec<IgnoreEntry>,
}

/// One ignored advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreEntry {
    /// Advisory id or alias
    pub id: String,
    pub reason: Option<String>,
}

impl ScanConfig {
    /// Parse TOML text. `origin` is only used in error messages.
    pub fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            path: origin.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Read {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// The ignore entry matching `vulnerability` by id or alias, if any.
    pub fn ignore_entry_for(&self, vulnerability: &Vulnerability) -> Option<&IgnoreEntry> {
        self.ignored_vulns
            .iter()
            .find(|entry| vulnerability.is_known_as(&entry.id))
    }
}

/// Resolves which [`ScanConfig`] applies to a source.
#[derive(Debug, Default)]
pub struct ConfigManager {
    override_config: Option<ScanConfig>,
    default_config: ScanConfig,
    per_directory: HashMap<PathBuf, ScanConfig>,
}

impl ConfigManager {
    /// Load the override file if one is given; it must exist.
    pub fn new(override_path: Option<&Path>) -> Result<Self, ConfigError> {
        let override_config = match override_path {
            Some(path) => {
                let config = ScanConfig::load(path)?;
                info!(
                    path = %path.display(),
                    ignored = config.ignored_vulns.len(),
                    "loaded config override"
                );
                Some(config)
            }
            None => None,
        };

        Ok(Self {
            override_config,
            ..Self::default()
        })
    }

    /// Config for `source`.
    ///
    /// Docker images have no directory and always get the override (or an
    /// empty config). Missing per-directory files yield an empty config;
    /// malformed ones are an error.
    pub fn config_for(&mut self, source: &Source) -> Result<&ScanConfig, ConfigError> {
        if let Some(config) = &self.override_config {
            return Ok(config);
        }

        let Some(dir) = config_dir(source) else {
            return Ok(&self.default_config);
        };

        match self.per_directory.entry(dir) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = entry.key().join(CONFIG_FILE_NAME);
                let config = match ScanConfig::load(&path) {
                    Ok(config) => {
                        info!(path = %path.display(), "loaded config");
                        config
                    }
                    Err(ConfigError::FileNotFound { .. }) => {
                        debug!(path = %path.display(), "no config file");
                        ScanConfig::default()
                    }
                    Err(e) => return Err(e),
                };
                Ok(entry.insert(config))
            }
        }
    }
}

fn config_dir(source: &Source) -> Option<PathBuf> {
    let location = Path::new(&source.location);
    let dir = match source.kind {
        SourceKind::Lockfile | SourceKind::Sbom => location.parent()?,
        SourceKind::Git => location,
        SourceKind::Docker => return None,
    };

    if dir.as_os_str().is_empty() {
        Some(PathBuf::from("."))
    } else {
        Some(dir.to_path_buf())
    }
}
