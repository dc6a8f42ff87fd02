//! Domain types -- sources, packages and vulnerabilities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of scan target a result was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Dependency-manager lockfile
    Lockfile,
    /// Software Bill of Materials document
    Sbom,
    /// Container image identifier
    Docker,
    /// Git repository root (its commit is the target)
    Git,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lockfile => write!(f, "lockfile"),
            Self::Sbom => write!(f, "sbom"),
            Self::Docker => write!(f, "docker"),
            Self::Git => write!(f, "git"),
        }
    }
}

/// A single scan target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Path for files and repositories, image name for docker
    #[serde(rename = "path")]
    pub location: String,
    /// Target kind
    #[serde(rename = "type")]
    pub kind: SourceKind,
}

impl Source {
    pub fn new(kind: SourceKind, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.location)
    }
}

/// Vulnerability severity.
///
/// `Ord` follows urgency: `Unknown < Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// No severity assigned by the advisory
    #[default]
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// A resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Ecosystem label as used by advisory databases (e.g. `crates.io`, `npm`)
    pub ecosystem: String,
}

/// A known vulnerability affecting a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Advisory identifier (e.g. `GHSA-xxxx-xxxx-xxxx`, `RUSTSEC-2024-0001`)
    pub id: String,
    /// Other identifiers for the same advisory (CVE ids etc.)
    #[serde(default)]
    pub aliases: Vec<String>,
    pub severity: Severity,
    pub summary: String,
    /// First version that is no longer affected, if any
    pub fixed_version: Option<String>,
}

impl Vulnerability {
    /// Whether this advisory is known under `id`, either directly or as an alias.
    pub fn is_known_as(&self, id: &str) -> bool {
        self.id == id || self.aliases.iter().any(|alias| alias == id)
    }
}
