//! qrpages runtime configuration handling

use crate::catalog::{Campaign, Catalog, SizePreset};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://YOUR_USERNAME.github.io/qr-hosting/";

/// Output directory used when none is configured, relative to the cwd
pub const DEFAULT_OUTPUT_DIR: &str = "assets/qr-codes";

/// `qrpages.{toml,yaml,yml}` in the cwd, then `$XDG_CONFIG_HOME/qrpages/config.{toml,yaml}`.
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = ["toml", "yaml", "yml"]
        .iter()
        .map(|ext| PathBuf::from(format!("qrpages.{ext}")))
        .collect();
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        let dir = PathBuf::from(xdg).join("qrpages");
        candidates.extend(["config.toml", "config.yaml"].iter().map(|name| dir.join(name)));
    }
    candidates
}

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrPagesConfig {
    /// Site and output settings
    pub generator: GeneratorOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Replacement size preset table
    pub presets: Option<Vec<SizePreset>>,
    /// Replacement campaign table
    pub campaigns: Option<Vec<Campaign>>,
}

impl QrPagesConfig {
    /// Load `explicit_path`, or the first discovered config file, or defaults;
    /// then apply `QRPAGES_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| config_candidates().into_iter().find(|p| p.is_file()));

        let mut config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.generator.apply_env_overrides();
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML or YAML file, chosen by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let parse: fn(&str) -> std::result::Result<Self, String> = match ext.as_str() {
            "toml" => |s| toml::from_str(s).map_err(|e| e.to_string()),
            "yaml" | "yml" => |s| serde_yaml::from_str(s).map_err(|e| e.to_string()),
            other => {
                return Err(Error::Config(format!(
                    "Unsupported config format '{other}', expected toml/yaml"
                )));
            }
        };

        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        parse(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Build the catalog, replacing built-in tables with any configured ones.
    pub fn catalog(&self) -> Result<Catalog> {
        if self.presets.is_none() && self.campaigns.is_none() {
            return Ok(Catalog::builtin());
        }

        let builtin = Catalog::builtin();
        let presets = self
            .presets
            .clone()
            .unwrap_or_else(|| builtin.presets().to_vec());
        let campaigns = self
            .campaigns
            .clone()
            .unwrap_or_else(|| builtin.campaigns().to_vec());
        Catalog::new(presets, campaigns)
    }
}

/// Where redirect pages live and where assets are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Site root the campaign redirect pages are served from
    pub base_url: String,
    /// Directory PNG/SVG files are written into
    pub output_dir: PathBuf,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl GeneratorOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = env::var("QRPAGES_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(dir) = env::var("QRPAGES_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRPAGES_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRPAGES_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRPAGES_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRPAGES_LOG_COLOR") {
            if let Some(parsed) = parse_flag(&color) {
                self.color = parsed;
            }
        }
        if let Ok(rotation) = env::var("QRPAGES_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
