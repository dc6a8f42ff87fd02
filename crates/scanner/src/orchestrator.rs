//! Local scan orchestrator
//!
//! [`LocalOrchestrator`] implements [`ScanOrchestrator`] on top of the local
//! filesystem:
//!
//! 1. load the config override, if any
//! 2. resolve the request into sources (`NoSourcesFound` if there are none)
//! 3. hand each source to the [`PackageMatcher`], stopping at the first failure
//! 4. drop ignored vulnerabilities per the applicable `vulnscan.toml`
//! 5. report `VulnerabilitiesFound` if anything is left

use tracing::{debug, info, warn};

use vulnscan_core::error::{ConfigError, ScanError};
use vulnscan_core::orchestrator::{ScanOrchestrator, ScanOutcome};
use vulnscan_core::request::ScanRequest;
use vulnscan_core::result::{ScanResult, SourceResult};

use crate::config::{ConfigManager, OrchestratorSettings};
use crate::engine::{NullMatcher, PackageMatcher};
use crate::resolve::{ScanSource, SourceResolver};

/// Filesystem-backed [`ScanOrchestrator`].
pub struct LocalOrchestrator {
    settings: OrchestratorSettings,
    resolver: SourceResolver,
    matcher: Box<dyn PackageMatcher>,
}

impl LocalOrchestrator {
    pub fn builder() -> LocalOrchestratorBuilder {
        LocalOrchestratorBuilder::new()
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    fn inspect(
        &self,
        source: &ScanSource,
        configs: &mut ConfigManager,
    ) -> Result<SourceResult, ScanError> {
        debug!(source = %source.source, matcher = self.matcher.name(), "inspecting source");
        let mut packages = self.matcher.inspect(source)?;
        let config = configs.config_for(&source.source)?;

        for report in &mut packages {
            report.vulnerabilities.retain(|vuln| match config.ignore_entry_for(vuln) {
                Some(entry) => {
                    info!(
                        id = %vuln.id,
                        package = %report.package.name,
                        reason = entry.reason.as_deref().unwrap_or(""),
                        "ignoring vulnerability"
                    );
                    false
                }
                None => true,
            });
        }

        Ok(SourceResult {
            source: source.source.clone(),
            packages,
        })
    }
}

impl Default for LocalOrchestrator {
    fn default() -> Self {
        let settings = OrchestratorSettings::default();
        Self {
            resolver: SourceResolver::new(settings.max_file_size),
            settings,
            matcher: Box::new(NullMatcher),
        }
    }
}

impl ScanOrchestrator for LocalOrchestrator {
    fn scan(&self, request: &ScanRequest) -> ScanOutcome {
        let mut configs = match ConfigManager::new(request.config_override()) {
            Ok(configs) => configs,
            Err(e) => return ScanOutcome::failed(ScanResult::default(), e.into()),
        };

        let sources = match self.resolver.resolve(request) {
            Ok(sources) => sources,
            Err(e) => return ScanOutcome::failed(ScanResult::default(), e),
        };

        if sources.is_empty() {
            return ScanOutcome::failed(ScanResult::default(), ScanError::NoSourcesFound);
        }

        info!(
            sources = sources.len(),
            max_file_size = self.settings.max_file_size,
            matcher = self.matcher.name(),
            "starting scan"
        );

        let mut result = ScanResult::default();
        for source in &sources {
            match self.inspect(source, &mut configs) {
                Ok(source_result) => result.results.push(source_result),
                Err(e) => {
                    warn!(source = %source.source, error = %e, "scan aborted");
                    if !result.is_empty() {
                        debug!(
                            completed = result.source_count(),
                            "returning partial result"
                        );
                    }
                    return ScanOutcome::failed(result, e);
                }
            }
        }

        let count = result.vulnerability_count();
        info!(
            sources = result.source_count(),
            packages = result.package_count(),
            vulnerabilities = count,
            "scan finished"
        );

        if count > 0 {
            ScanOutcome::failed(result, ScanError::VulnerabilitiesFound { count })
        } else {
            ScanOutcome::clean(result)
        }
    }
}

/// Builder for [`LocalOrchestrator`].
#[derive(Default)]
pub struct LocalOrchestratorBuilder {
    settings: OrchestratorSettings,
    matcher: Option<Box<dyn PackageMatcher>>,
}

impl LocalOrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: OrchestratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn max_file_size(mut self, size: usize) -> Self {
        self.settings.max_file_size = size;
        self
    }

    /// Attach the engine. Defaults to [`NullMatcher`].
    pub fn matcher(mut self, matcher: impl PackageMatcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Validate settings and build.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` when a setting is out of range
    pub fn build(self) -> Result<LocalOrchestrator, ConfigError> {
        self.settings.validate()?;
        Ok(LocalOrchestrator {
            resolver: SourceResolver::new(self.settings.max_file_size),
            settings: self.settings,
            matcher: self.matcher.unwrap_or_else(|| Box::new(NullMatcher)),
        })
    }
}
