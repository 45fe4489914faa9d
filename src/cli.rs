//! Command-line argument definitions for `detsort`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

/// Sort detection lists in JSON files by timestamp.
///
/// Reorders the top-level array, or the array under the `detections` key,
/// by each record's `timestamp` field. All other JSON structure is left
/// untouched. Without `--output` the input file is rewritten in place.
#[derive(Debug, Parser)]
#[command(name = "detsort", version, about, long_about = None)]
pub struct Cli {
    /// Path to the input JSON file.
    #[arg(required_unless_present = "completions")]
    pub input: Option<PathBuf>,

    /// Output file. If omitted, the input file is modified in place.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Dry run: analyze and report, but do not write any changes.
    #[arg(long)]
    pub dry: bool,

    /// Override the record field holding the timestamp.
    #[arg(short = 't', long, value_parser = parse_key_arg)]
    pub timestamp_key: Option<String>,

    /// Override the object key holding the record list.
    #[arg(short = 'k', long, value_parser = parse_key_arg)]
    pub list_key: Option<String>,

    /// Control color of the report tags.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    /// Defaults to the config file setting, then `auto`.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit debug diagnostics on stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print shell completions for the given shell and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

impl ColorMode {
    /// Loose parse used for config file values; unknown names fall back to `Auto`.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "always" => Self::Always,
            "never" => Self::Never,
            _ => Self::Auto,
        }
    }
}

/// Reject empty key names; any other string is a valid JSON key.
fn parse_key_arg(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("key must not be empty".to_string());
    }
    Ok(s.to_string())
}
