//! File-name detection for lockfiles and SBOM documents
//!
//! Detection never opens the file; it only decides whether a path is a scan
//! target and which ecosystem or SBOM format it belongs to. Reading and
//! parsing the content is the engine's job.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Recognizes lockfiles by exact file name.
pub struct LockfileDetector {
    /// Known lockfile names and their ecosystem
    known_filenames: Vec<(&'static str, &'static str)>,
}

impl LockfileDetector {
    /// Detector with the default set of lockfile names.
    pub fn new() -> Self {
        Self {
            known_filenames: vec![
                ("Cargo.lock", "crates.io"),
                ("package-lock.json", "npm"),
                ("yarn.lock", "npm"),
                ("pnpm-lock.yaml", "npm"),
                ("composer.lock", "Packagist"),
                ("Gemfile.lock", "RubyGems"),
                ("go.mod", "Go"),
                ("poetry.lock", "PyPI"),
                ("Pipfile.lock", "PyPI"),
                ("pdm.lock", "PyPI"),
                ("requirements.txt", "PyPI"),
                ("pom.xml", "Maven"),
                ("gradle.lockfile", "Maven"),
                ("buildscript-gradle.lockfile", "Maven"),
                ("pubspec.lock", "Pub"),
                ("mix.lock", "Hex"),
                ("packages.lock.json", "NuGet"),
                ("renv.lock", "CRAN"),
                ("conan.lock", "ConanCenter"),
            ],
        }
    }

    /// Ecosystem of the lockfile at `path`, if its name is known.
    pub fn detect_ecosystem(&self, path: &Path) -> Option<&'static str> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;

        self.known_filenames
            .iter()
            .find(|(known, _)| *known == file_name)
            .map(|(_, ecosystem)| *ecosystem)
    }
}

impl Default for LockfileDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// SBOM document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SbomFormat {
    CycloneDx,
    Spdx,
}

impl fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycloneDx => write!(f, "cyclonedx"),
            Self::Spdx => write!(f, "spdx"),
        }
    }
}

/// Recognizes SBOM documents by naming convention.
///
/// - CycloneDX: `bom.json`, `bom.xml`, `*.cdx.json`, `*.cdx.xml`
/// - SPDX: `*.spdx`, `*.spdx.json`, `*.spdx.yml`, `*.spdx.rdf`, `*.spdx.rdf.xml`
#[derive(Debug, Default)]
pub struct SbomDetector;

const CYCLONEDX_NAMES: &[&str] = &["bom.json", "bom.xml"];
const CYCLONEDX_SUFFIXES: &[&str] = &[".cdx.json", ".cdx.xml"];
const SPDX_SUFFIXES: &[&str] = &[
    ".spdx",
    ".spdx.json",
    ".spdx.yml",
    ".spdx.rdf",
    ".spdx.rdf.xml",
];

impl SbomDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect_format(&self, path: &Path) -> Option<SbomFormat> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;

        if CYCLONEDX_NAMES.contains(&file_name)
            || CYCLONEDX_SUFFIXES.iter().any(|s| file_name.ends_with(s))
        {
            return Some(SbomFormat::CycloneDx);
        }

        if SPDX_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
            return Some(SbomFormat::Spdx);
        }

        None
    }
}
