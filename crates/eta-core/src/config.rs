//! Configuration types for eta.
//!
//! [`Config::load`] reads `~/.config/eta/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit path instead. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::summary::SpeedBands;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
train_csv = "data/train.csv"

[model]
path = ""

[server]
bind = "127.0.0.1:8080"

[summary]
datetime_format      = "%d %B %Y, %I:%M %p"
clock_format         = "%I:%M %p"
fast_below_minutes   = 30.0
normal_up_to_minutes = 45.0
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/eta/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_train_csv")]
    pub train_csv: PathBuf,
}

fn default_train_csv() -> PathBuf { PathBuf::from("data/train.csv") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            train_csv: default_train_csv(),
        }
    }
}

/// `[model]` section of `config.toml`. An empty path selects the built-in
/// coefficients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub path: String,
}

impl ModelConfig {
    pub fn model_path(&self) -> Option<&Path> {
        (!self.path.is_empty()).then(|| Path::new(&self.path))
    }
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8080".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// `[summary]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    #[serde(default = "default_clock_format")]
    pub clock_format: String,
    #[serde(default = "default_fast_below_minutes")]
    pub fast_below_minutes: f64,
    #[serde(default = "default_normal_up_to_minutes")]
    pub normal_up_to_minutes: f64,
}

fn default_datetime_format() -> String { "%d %B %Y, %I:%M %p".to_string() }
fn default_clock_format() -> String { "%I:%M %p".to_string() }
fn default_fast_below_minutes() -> f64 { 30.0 }
fn default_normal_up_to_minutes() -> f64 { 45.0 }

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            datetime_format: default_datetime_format(),
            clock_format: default_clock_format(),
            fast_below_minutes: default_fast_below_minutes(),
            normal_up_to_minutes: default_normal_up_to_minutes(),
        }
    }
}

impl SummaryConfig {
    pub fn bands(&self) -> SpeedBands {
        SpeedBands {
            fast_below: self.fast_below_minutes,
            normal_up_to: self.normal_up_to_minutes,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/eta/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("eta")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
