//! Output formatting abstraction for table vs JSON rendering
//!
//! Everything the binary prints flows through an [`OutputSink`]: scan results
//! on the normal channel, diagnostics on the error channel. [`Reporter`] is
//! the implementation over any pair of writers.

use std::io::Write;

use serde::Serialize;

use vulnscan_core::result::ScanResult;
use vulnscan_core::types::Severity;

/// Rendering mode for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable table (neutral mode).
    #[default]
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Failure to render a result.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Where the dispatcher sends everything it prints.
pub trait OutputSink {
    fn mode(&self) -> OutputMode;

    fn set_mode(&mut self, mode: OutputMode);

    /// Render a scan result on the normal channel in the current mode.
    fn render(&mut self, result: &ScanResult) -> Result<(), OutputError>;

    /// Write a message on the error channel.
    fn print_diagnostic(&mut self, message: &str);

    /// Write text verbatim on the normal channel.
    fn print_plain(&mut self, message: &str);
}

/// Trait for human-readable text rendering.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

/// [`OutputSink`] over a stdout/stderr writer pair.
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    mode: OutputMode,
}

impl<'a> Reporter<'a> {
    /// Create a reporter in the neutral [`OutputMode::Table`] mode.
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self {
            out,
            err,
            mode: OutputMode::default(),
        }
    }

    fn write_payload<T: Render + Serialize>(&mut self, payload: &T) -> Result<(), OutputError> {
        match self.mode {
            OutputMode::Table => payload.render_text(&mut *self.out)?,
            OutputMode::Json => {
                serde_json::to_writer_pretty(&mut *self.out, payload)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

impl OutputSink for Reporter<'_> {
    fn mode(&self) -> OutputMode {
        self.mode
    }

    fn set_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn render(&mut self, result: &ScanResult) -> Result<(), OutputError> {
        self.write_payload(&ResultView(result))
    }

    fn print_diagnostic(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "{message}") {
            tracing::warn!(error = %e, "failed to write diagnostic");
        }
    }

    fn print_plain(&mut self, message: &str) {
        let written = self
            .out
            .write_all(message.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write output");
        }
    }
}

/// Borrowed result payload; serializes exactly like [`ScanResult`].
#[derive(Serialize)]
#[serde(transparent)]
struct ResultView<'r>(&'r ScanResult);

impl Render for ResultView<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let result = self.0;
        writeln!(
            w,
            "Scanned {} sources, {} packages",
            result.source_count(),
            result.package_count()
        )?;

        let rows = result.flatten();
        if rows.is_empty() {
            writeln!(w, "{}", "No vulnerabilities found.".green())?;
            return Ok(());
        }

        let counts = result.severity_counts();
        let summary = format!(
            "{} total (C:{} H:{} M:{} L:{} U:{})",
            counts.total(),
            counts.critical,
            counts.high,
            counts.medium,
            counts.low,
            counts.unknown
        );
        writeln!(w, "Vulnerabilities: {}", summary.red().bold())?;
        writeln!(w)?;

        writeln!(
            w,
            "{:<22} {:<10} {:<12} {:<25} {:<12} {:<12} Source",
            "ID", "Severity", "Ecosystem", "Package", "Version", "Fixed"
        )?;
        writeln!(w, "{}", "-".repeat(110))?;

        for row in rows {
            let severity = row.vulnerability.severity.to_string();
            let severity_colored = match row.vulnerability.severity {
                Severity::Critical => severity.red().bold(),
                Severity::High => severity.red(),
                Severity::Medium => severity.yellow(),
                Severity::Low => severity.normal(),
                Severity::Unknown => severity.dimmed(),
            };

            // escape codes must not count toward the column width
            let severity_cell = format!("{severity_colored}{}", pad(&severity, 10));

            writeln!(
                w,
                "{:<22} {} {:<12} {:<25} {:<12} {:<12} {}",
                row.vulnerability.id,
                severity_cell,
                row.package.ecosystem,
                row.package.name,
                row.package.version,
                row.vulnerability.fixed_version.as_deref().unwrap_or("N/A"),
                row.source
            )?;
        }

        Ok(())
    }
}

/// Spaces needed to pad `s` to `width` columns.
fn pad(s: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(s.chars().count()))
}
