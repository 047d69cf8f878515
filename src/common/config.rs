//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Answer service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,

    /// Rate limiting between requests
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Answer service connection settings
///
/// Anything left unset here is asked for interactively.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServiceConfig {
    /// Base URL of the service, e.g. `https://my-kb.azurewebsites.net/qnamaker`
    pub hostname: Option<String>,

    /// Endpoint key sent in the `Authorization` header
    pub auth_key: Option<String>,

    /// Knowledge base identifier
    pub knowledge_base: Option<String>,
}

/// Grading settings
#[derive(Debug, Deserialize, Default)]
pub struct GradingConfig {
    /// Minimum similarity ratio (0-100) for a PASS; prompted for when unset
    pub threshold: Option<u8>,
}

/// Pass threshold offered when prompting
pub const DEFAULT_THRESHOLD: u8 = 75;

/// Delay inserted after every service call
#[derive(Debug, Deserialize)]
pub struct ThrottleConfig {
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay(),
        }
    }
}

fn default_delay() -> u64 {
    1000
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Timeout for a single generateAnswer request
    #[serde(default = "default_request")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request(),
        }
    }
}

fn default_request() -> u64 {
    30
}

/// Report output settings
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Where the report workbook is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("result.xlsx")
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
