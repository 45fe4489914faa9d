//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/detsort/config.toml` or `$XDG_CONFIG_HOME/detsort/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::error::DetsortError;

/// Record field holding the timestamp unless overridden.
pub const DEFAULT_TIMESTAMP_KEY: &str = "timestamp";

/// Object key holding the record list unless overridden.
pub const DEFAULT_LIST_KEY: &str = "detections";

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::new`] for built-in defaults around an input path (useful in tests).
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read.
    pub input: PathBuf,
    /// Destination of the sorted document; `None` rewrites [`input`](Self::input).
    pub output: Option<PathBuf>,
    /// Report only, never write.
    pub dry_run: bool,
    /// Color mode for the report tags.
    pub color_mode: ColorMode,
    /// Record field holding the timestamp.
    pub timestamp_key: String,
    /// Object key holding the record list in keyed documents.
    pub list_key: String,
}

impl Config {
    /// Defaults for the given input file.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            dry_run: false,
            color_mode: ColorMode::Auto,
            timestamp_key: DEFAULT_TIMESTAMP_KEY.to_string(),
            list_key: DEFAULT_LIST_KEY.to_string(),
        }
    }

    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, DetsortError> {
        let input = cli
            .input
            .clone()
            .ok_or_else(|| DetsortError::Config("no input file given".to_string()))?;
        let mut config = Self::new(input);

        // An explicit --config must exist; the default location is optional.
        match cli.config {
            Some(ref path) => config.apply_file_config(FileConfig::load(path)?),
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    config.apply_file_config(FileConfig::load(&path)?);
                }
            }
        }

        if let Some(color) = cli.color {
            config.color_mode = color;
        }
        if let Some(ref key) = cli.timestamp_key {
            config.timestamp_key.clone_from(key);
        }
        if let Some(ref key) = cli.list_key {
            config.list_key.clone_from(key);
        }

        config.output.clone_from(&cli.output);
        config.dry_run = cli.dry;

        Ok(config)
    }

    /// Where the document gets written: `--output`, or the input file itself.
    pub fn destination(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/detsort/config.toml` or `~/.config/detsort/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("detsort").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("detsort")
                .join("config.toml")
        } else {
            PathBuf::from(".config/detsort/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = ColorMode::from_str_loose(&color);
        }

        if let Some(keys) = file.keys {
            if let Some(ts) = keys.timestamp.filter(|k| !k.is_empty()) {
                self.timestamp_key = ts;
            }
            if let Some(list) = keys.list.filter(|k| !k.is_empty()) {
                self.list_key = list;
            }
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
struct FileConfig {
    color: Option<String>,
    keys: Option<KeysConfig>,
}

#[derive(Debug, Deserialize)]
struct KeysConfig {
    timestamp: Option<String>,
    list: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, DetsortError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DetsortError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
