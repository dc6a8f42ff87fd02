//! Argument translation -- raw arguments to a validated [`ScanRequest`]

use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;

use vulnscan_core::request::{ScanRequest, ScanRequestBuilder};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::OutputMode;

/// What the arguments ask for.
#[derive(Debug)]
pub enum Invocation {
    /// `--help`: print the rendered usage text.
    Help(String),
    /// `--version`: print version metadata.
    Version,
    /// Run a scan.
    Scan(Translation),
}

/// A validated scan invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub request: ScanRequest,
    pub mode: OutputMode,
}

/// `--format` value parser.
pub fn parse_format(value: &str) -> Result<OutputMode, String> {
    match value {
        "table" => Ok(OutputMode::Table),
        "json" => Ok(OutputMode::Json),
        other => Err(format!(
            "unsupported output format \"{other}\" - must be either \"table\" or \"json\""
        )),
    }
}

/// `--json` overrides whatever `--format` says.
pub fn effective_mode(format: OutputMode, json: bool) -> OutputMode {
    if json { OutputMode::Json } else { format }
}

/// Parse and validate `args` (including the program name).
///
/// # Errors
///
/// `CliError::Validation` for unknown flags, missing values and unsupported
/// formats.
pub fn translate<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp => Ok(Invocation::Help(e.render().to_string())),
                ErrorKind::DisplayVersion => Ok(Invocation::Version),
                _ => Err(CliError::Validation(e.to_string().trim_end().to_owned())),
            };
        }
    };

    Ok(Invocation::Scan(into_translation(cli)))
}

fn into_translation(cli: Cli) -> Translation {
    let mode = effective_mode(cli.format, cli.json);
    let request = ScanRequestBuilder::new()
        .lockfile_paths(cli.lockfile)
        .sbom_paths(cli.sbom)
        .docker_images(cli.docker)
        .directory_paths(cli.directories)
        .recursive(cli.recursive)
        .skip_git(cli.skip_git)
        .config_override(cli.config)
        .build();

    Translation { request, mode }
}
