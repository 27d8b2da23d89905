//! Run configuration loaded from the JSON config file

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No GitHub token: set `token` in the config, pass --token or export GITHUB_TOKEN")]
    MissingToken,

    #[error("`attrs` must name at least one repository field")]
    NoAttributes,

    #[error("criteria.time.min ({min}) is after criteria.time.max ({max})")]
    InvertedYears { min: i32, max: i32 },
}

/// Export format for the result tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    /// Parse a configured format name, case-insensitively.
    ///
    /// Returns `None` for names that are not recognized.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "CSV" => Some(Self::Csv),
            "JSON" => Some(Self::Json),
            "MARKDOWN" => Some(Self::Markdown),
            "HTML" => Some(Self::Html),
            _ => None,
        }
    }

    /// File extension written for this format
    #[inline]
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Markdown => "mk",
            Self::Html => "html",
        }
    }
}

/// Inclusive year window searched for each term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearWindow {
    pub min: i32,
    pub max: i32,
}

impl YearWindow {
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Criteria {
    pub time: YearWindow,
}

/// Sleep durations used around the rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after every normally processed batch
    pub cooldown_secs: u64,
    /// Extra wait added on top of a rate-limit reset
    pub grace_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 120,
            grace_secs: 30,
        }
    }
}

impl PacingConfig {
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    #[must_use]
    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }
}

/// Full run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub readme_dir: Option<PathBuf>,
    /// Raw format name; see [`Config::output_format`]
    #[serde(default)]
    pub format: Option<String>,
    pub terms: Vec<String>,
    pub attrs: Vec<String>,
    pub criteria: Criteria,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Base URI for GitHub Enterprise
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("./")
}

impl Config {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config JSON held in memory.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.attrs.is_empty() {
            return Err(ConfigError::NoAttributes);
        }
        let window = self.criteria.time;
        if window.min > window.max {
            return Err(ConfigError::InvertedYears {
                min: window.min,
                max: window.max,
            });
        }
        Ok(())
    }

    /// Apply command-line overrides. A token given here wins over the file.
    #[must_use]
    pub fn with_overrides(mut self, token: Option<String>, verbose: bool) -> Self {
        if token.is_some() {
            self.token = token;
        }
        self.verbose |= verbose;
        self
    }

    /// Token to authenticate with, or [`ConfigError::MissingToken`].
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Configured export format, CSV when unset or unrecognized.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_deref() {
            None => OutputFormat::Csv,
            Some(name) => OutputFormat::parse(name).unwrap_or_else(|| {
                log::warn!("Unknown output format `{name}`, writing CSV");
                OutputFormat::Csv
            }),
        }
    }

    /// Column headers of the exported tables
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.attrs.clone();
        columns.push("readme_url".to_string());
        columns.push("owner_type".to_string());
        columns
    }
}
