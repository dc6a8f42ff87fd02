//! CLI argument parsing using clap derive API
//!
//! Purely declarative: value validation happens inside clap through
//! [`parse_format`], nothing here performs I/O.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::output::OutputMode;
use crate::translate::parse_format;

/// Scans lockfiles, SBOMs, container images and directories for
/// dependencies and matches them against known vulnerabilities.
#[derive(Parser, Debug)]
#[command(
    name = "vulnscan",
    version,
    about,
    long_about = None,
    args_override_self = true,
    disable_version_flag = true,
    override_usage = "vulnscan [OPTIONS] [directory1 directory2...]"
)]
pub struct Cli {
    /// Scan docker image with this name.
    #[arg(short = 'D', long = "docker", value_name = "IMAGE")]
    pub docker: Vec<String>,

    /// Scan package lockfile on this path.
    #[arg(short = 'L', long = "lockfile", value_name = "PATH")]
    pub lockfile: Vec<PathBuf>,

    /// Scan SBOM file on this path.
    #[arg(short = 'S', long = "sbom", value_name = "PATH")]
    pub sbom: Vec<PathBuf>,

    /// Set/override config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (table, json).
    #[arg(short = 'f', long, default_value = "table", value_parser = parse_format)]
    pub format: OutputMode,

    /// Set output to json (deprecated, use --format json instead).
    #[arg(long)]
    pub json: bool,

    /// Skip scanning git repositories.
    #[arg(long)]
    pub skip_git: bool,

    /// Check subdirectories.
    #[arg(short, long)]
    pub recursive: bool,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Directories to scan.
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,
}
