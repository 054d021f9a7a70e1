use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration module.
/// Every knob the core consumes is an explicit, typed field validated here
/// at the boundary, before any parsing or merging starts.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Margin in seconds added symmetrically around every cut
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Similarity threshold for diff block matching (0.0-1.0)
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f32,

    /// Timeline export target handed to auto-editor, if any
    #[serde(default)]
    pub export: Option<ExportTarget>,

    /// Seconds to wait for auto-editor before giving up
    #[serde(default = "default_export_timeout_secs")]
    pub export_timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Timeline export target (closed set understood by auto-editor).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ExportTarget {
    FinalCutPro,
    Premiere,
    Resolve,
}

impl ExportTarget {
    /// Identifier auto-editor expects on its command line.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::FinalCutPro => "final-cut-pro",
            Self::Premiere => "premiere",
            Self::Resolve => "resolve",
        }
    }
}

impl std::fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_arg())
    }
}

impl FromStr for ExportTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "final-cut-pro" | "fcp" => Ok(Self::FinalCutPro),
            "premiere" => Ok(Self::Premiere),
            "resolve" => Ok(Self::Resolve),
            _ => Err(anyhow!("Invalid export target: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_margin() -> f64 {
    0.1
}

fn default_match_threshold() -> f32 {
    0.8
}

fn default_export_timeout_secs() -> u64 {
    600
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file when it exists, defaults otherwise.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration before the core runs.
    pub fn validate(&self) -> Result<()> {
        if self.margin < 0.0 || !self.margin.is_finite() {
            return Err(anyhow!(
                "Margin must be a non-negative number of seconds, got {}",
                self.margin
            ));
        }

        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(anyhow!(
                "Match threshold must be in 0.0..=1.0, got {}",
                self.match_threshold
            ));
        }

        if self.export_timeout_secs == 0 {
            return Err(anyhow!("Export timeout must be at least 1 second"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            match_threshold: default_match_threshold(),
            export: None,
            export_timeout_secs: default_export_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}
