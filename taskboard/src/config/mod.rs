//! Configuration system for the `taskboard` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (`TASKBOARD_LOG` for the log level, via clap `env`)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use taskboard_core::animation::DEFAULT_DURATION;
use taskboard_core::gesture::ROW_HEIGHT;

/// Fewest terminal lines a row can use: one for the title, one for the
/// description.
pub const MIN_ROW_LINES: u16 = 2;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    ui: UiFileConfig,
    list: ListFileConfig,
    animation: AnimationFileConfig,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    tick_interval_ms: Option<u64>,
    timestamp_format: Option<String>,
}

/// `[list]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ListFileConfig {
    row_height: Option<f32>,
    row_lines: Option<u16>,
}

/// `[animation]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AnimationFileConfig {
    return_duration_ms: Option<u64>,
    enter_duration_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // -- UI --
    /// Interval between animation ticks (and redraws while idle).
    pub tick_interval: Duration,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,

    // -- List --
    /// Height of one task row in drag units.
    pub row_height: f32,
    /// Terminal lines drawn per task row.
    pub row_lines: u16,

    // -- Animation --
    /// How long a released row takes to settle into its slot.
    pub return_duration: Duration,
    /// How long a new row takes to slide into place.
    pub enter_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            timestamp_format: "%H:%M".to_string(),
            row_height: ROW_HEIGHT,
            row_lines: 3,
            return_duration: DEFAULT_DURATION,
            enter_duration: DEFAULT_DURATION,
        }
    }
}

impl Config {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. If no `--config` is given, the default path
    /// (`~/.config/taskboard/config.toml`) is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `Config` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Out-of-range geometry falls back to
    /// something drawable rather than failing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            tick_interval: file
                .ui
                .tick_interval_ms
                .filter(|ms| *ms > 0)
                .map_or(defaults.tick_interval, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            row_height: file
                .list
                .row_height
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(defaults.row_height),
            row_lines: file
                .list
                .row_lines
                .map_or(defaults.row_lines, |lines| lines.max(MIN_ROW_LINES)),
            return_duration: file
                .animation
                .return_duration_ms
                .map_or(defaults.return_duration, Duration::from_millis),
            enter_duration: file
                .animation
                .enter_duration_ms
                .map_or(defaults.enter_duration, Duration::from_millis),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal to-do list with drag-to-reorder")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Timestamp display format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
