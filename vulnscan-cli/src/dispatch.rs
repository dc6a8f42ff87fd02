//! Dispatcher -- runs one invocation end to end and picks the exit status

use std::ffi::OsString;
use std::io::Write;

use tracing::debug;

use vulnscan_core::orchestrator::ScanOrchestrator;

use crate::error::CliError;
use crate::exit_codes;
use crate::output::{OutputSink, Reporter};
use crate::translate::{Invocation, translate};
use crate::version::VersionInfo;

/// Owns the output sink for one invocation.
///
/// The sink is handed in already constructed (in its neutral mode) so that
/// every path, including argument errors, prints through the same instance.
pub struct Dispatcher<'a, S: OutputSink> {
    orchestrator: &'a dyn ScanOrchestrator,
    sink: S,
}

impl<'a, S: OutputSink> Dispatcher<'a, S> {
    pub fn new(orchestrator: &'a dyn ScanOrchestrator, sink: S) -> Self {
        Self { orchestrator, sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run `args` (including the program name) and return the exit status.
    pub fn run<I, T>(&mut self, args: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.execute(args) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => self.terminate(&e),
        }
    }

    fn execute<I, T>(&mut self, args: I) -> Result<(), CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let translation = match translate(args)? {
            Invocation::Help(text) => {
                self.sink.print_plain(&text);
                return Ok(());
            }
            Invocation::Version => {
                self.sink.print_plain(&VersionInfo::current().to_string());
                return Ok(());
            }
            Invocation::Scan(translation) => translation,
        };

        self.sink.set_mode(translation.mode);
        debug!(mode = ?translation.mode, request = ?translation.request, "dispatching scan");

        let (result, scan_error) = self.orchestrator.scan(&translation.request).into_parts();

        // a render failure replaces whatever the scan reported
        self.sink.render(&result)?;

        match scan_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn terminate(&mut self, err: &CliError) -> i32 {
        debug!(kind = ?err.kind(), error = %err, "invocation terminated");
        if let Some(message) = err.diagnostic() {
            self.sink.print_diagnostic(&message);
        }
        err.exit_code()
    }
}

/// Run one invocation against `orchestrator`, printing to `stdout`/`stderr`.
pub fn run<I, T>(
    args: I,
    orchestrator: &dyn ScanOrchestrator,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let reporter = Reporter::new(stdout, stderr);
    Dispatcher::new(orchestrator, reporter).run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::path::PathBuf;

    use vulnscan_core::error::ScanError;
    use vulnscan_core::orchestrator::ScanOutcome;
    use vulnscan_core::request::ScanRequest;
    use vulnscan_core::result::{PackageReport, ScanResult, SourceResult};
    use vulnscan_core::types::{Package, Severity, Source, SourceKind, Vulnerability};

    use crate::error::NO_SOURCES_MESSAGE;
    use crate::output::{OutputError, OutputMode};

    /// Orchestrator returning a canned outcome and recording its calls.
    struct FakeOrchestrator {
        outcome: Box<dyn Fn() -> ScanOutcome>,
        calls: Cell<usize>,
        last_request: RefCell<Option<ScanRequest>>,
    }

    impl FakeOrchestrator {
        fn new(outcome: impl Fn() -> ScanOutcome + 'static) -> Self {
            Self {
                outcome: Box::new(outcome),
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    impl ScanOrchestrator for FakeOrchestrator {
        fn scan(&self, request: &ScanRequest) -> ScanOutcome {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            (self.outcome)()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Render(OutputMode, usize),
        Diagnostic(String),
        Plain(String),
    }

    /// Sink that records every call, optionally failing renders.
    #[derive(Default)]
    struct RecordingSink {
        mode: OutputMode,
        events: Vec<Event>,
        fail_render: bool,
    }

    impl OutputSink for RecordingSink {
        fn mode(&self) -> OutputMode {
            self.mode
        }

        fn set_mode(&mut self, mode: OutputMode) {
            self.mode = mode;
        }

        fn render(&mut self, result: &ScanResult) -> Result<(), OutputError> {
            self.events
                .push(Event::Render(self.mode, result.vulnerability_count()));
            if self.fail_render {
                return Err(OutputError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "stdout closed",
                )));
            }
            Ok(())
        }

        fn print_diagnostic(&mut self, message: &str) {
            self.events.push(Event::Diagnostic(message.to_owned()));
        }

        fn print_plain(&mut self, message: &str) {
            self.events.push(Event::Plain(message.to_owned()));
        }
    }

    fn vulnerable_result() -> ScanResult {
        ScanResult {
            results: vec![SourceResult {
                source: Source::new(SourceKind::Lockfile, "Cargo.lock"),
                packages: vec![PackageReport {
                    package: Package {
                        name: "smallvec".to_owned(),
                        version: "1.6.0".to_owned(),
                        ecosystem: "crates.io".to_owned(),
                    },
                    vulnerabilities: vec![Vulnerability {
                        id: "RUSTSEC-2021-0003".to_owned(),
                        aliases: Vec::new(),
                        severity: Severity::Critical,
                        summary: "Buffer overflow in SmallVec::insert_many".to_owned(),
                        fixed_version: Some("1.6.1".to_owned()),
                    }],
                }],
            }],
        }
    }

    fn dispatch(
        orchestrator: &FakeOrchestrator,
        sink: RecordingSink,
        args: &[&str],
    ) -> (i32, Vec<Event>) {
        let mut dispatcher = Dispatcher::new(orchestrator, sink);
        let code = dispatcher.run(args.iter().copied());
        (code, dispatcher.into_sink().events)
    }

    #[test]
    fn clean_scan_exits_zero() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "."]);

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(events, [Event::Render(OutputMode::Table, 0)]);
        assert_eq!(orch.calls.get(), 1);
    }

    #[test]
    fn findings_exit_one_without_diagnostic() {
        let orch = FakeOrchestrator::new(|| {
            ScanOutcome::failed(
                vulnerable_result(),
                ScanError::VulnerabilitiesFound { count: 1 },
            )
        });
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "."]);

        assert_eq!(code, exit_codes::VULNERABILITIES_FOUND);
        assert_eq!(events, [Event::Render(OutputMode::Table, 1)]);
    }

    #[test]
    fn no_sources_exits_128_with_hint() {
        let orch = FakeOrchestrator::new(|| {
            ScanOutcome::failed(ScanResult::default(), ScanError::NoSourcesFound)
        });
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan"]);

        assert_eq!(code, exit_codes::NO_SOURCES);
        assert_eq!(
            events,
            [
                Event::Render(OutputMode::Table, 0),
                Event::Diagnostic(NO_SOURCES_MESSAGE.to_owned()),
            ]
        );
    }

    #[test]
    fn scan_failure_exits_127_with_cause() {
        let orch = FakeOrchestrator::new(|| {
            ScanOutcome::failed(
                ScanResult::default(),
                ScanError::Engine("advisory database unreachable".to_owned()),
            )
        });
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "."]);

        assert_eq!(code, exit_codes::GENERIC_FAILURE);
        assert_eq!(
            events[1],
            Event::Diagnostic("engine error: advisory database unreachable".to_owned())
        );
    }

    #[test]
    fn partial_result_rendered_before_failure() {
        let orch = FakeOrchestrator::new(|| {
            ScanOutcome::failed(
                vulnerable_result(),
                ScanError::Engine("second source failed".to_owned()),
            )
        });
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "."]);

        assert_eq!(code, exit_codes::GENERIC_FAILURE);
        assert_eq!(events[0], Event::Render(OutputMode::Table, 1));
    }

    #[test]
    fn invalid_format_never_scans() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));
        let (code, events) = dispatch(
            &orch,
            RecordingSink::default(),
            &["vulnscan", "--format", "xml", "."],
        );

        assert_eq!(code, exit_codes::GENERIC_FAILURE);
        assert_eq!(orch.calls.get(), 0);
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::Diagnostic(message) => {
                assert!(message.contains("unsupported output format \"xml\""), "{message}");
            }
            other => panic!("expected diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn json_mode_applied_before_render() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));

        let (_, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "-f", "json"]);
        assert_eq!(events, [Event::Render(OutputMode::Json, 0)]);

        let (_, events) = dispatch(
            &orch,
            RecordingSink::default(),
            &["vulnscan", "--format", "table", "--json"],
        );
        assert_eq!(events, [Event::Render(OutputMode::Json, 0)]);
    }

    #[test]
    fn request_passed_through() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));
        dispatch(
            &orch,
            RecordingSink::default(),
            &["vulnscan", "-L", "Cargo.lock", "-r", "vendor"],
        );

        let request = orch.last_request.borrow().clone().expect("scan was called");
        assert_eq!(request.lockfile_paths(), [PathBuf::from("Cargo.lock")]);
        assert_eq!(request.directory_paths(), [PathBuf::from("vendor")]);
        assert!(request.recursive());
        assert!(!request.skip_git());
    }

    #[test]
    fn render_failure_overrides_findings() {
        let orch = FakeOrchestrator::new(|| {
            ScanOutcome::failed(
                vulnerable_result(),
                ScanError::VulnerabilitiesFound { count: 1 },
            )
        });
        let sink = RecordingSink {
            fail_render: true,
            ..RecordingSink::default()
        };
        let (code, events) = dispatch(&orch, sink, &["vulnscan", "."]);

        assert_eq!(code, exit_codes::GENERIC_FAILURE);
        assert_eq!(
            events[1],
            Event::Diagnostic("failed to write output: stdout closed".to_owned())
        );
    }

    #[test]
    fn render_failure_on_clean_scan() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));
        let sink = RecordingSink {
            fail_render: true,
            ..RecordingSink::default()
        };
        let (code, _) = dispatch(&orch, sink, &["vulnscan", "."]);
        assert_eq!(code, exit_codes::GENERIC_FAILURE);
    }

    #[test]
    fn version_prints_metadata_without_scanning() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "--version"]);

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(orch.calls.get(), 0);
        assert_eq!(events, [Event::Plain(VersionInfo::current().to_string())]);
    }

    #[test]
    fn help_prints_usage_without_scanning() {
        let orch = FakeOrchestrator::new(|| ScanOutcome::clean(ScanResult::default()));
        let (code, events) = dispatch(&orch, RecordingSink::default(), &["vulnscan", "-h"]);

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(orch.calls.get(), 0);
        assert!(matches!(&events[..], [Event::Plain(text)] if text.contains("--skip-git")));
    }

    #[test]
    fn run_writes_to_separate_channels() {
        let orch = FakeOrchestrator::new(|| {
            ScanOutcome::failed(ScanResult::default(), ScanError::NoSourcesFound)
        });
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["vulnscan", "--json"], &orch, &mut out, &mut err);

        assert_eq!(code, exit_codes::NO_SOURCES);
        let rendered: serde_json::Value =
            serde_json::from_slice(&out).expect("stdout holds the json result");
        assert!(rendered["results"].as_array().is_some_and(Vec::is_empty));
        assert_eq!(
            String::from_utf8(err).expect("valid UTF-8"),
            format!("{NO_SOURCES_MESSAGE}\n")
        );
    }
}
