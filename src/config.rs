use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_LOG_FILE, DEFAULT_PHOTO_LIMIT,
    DEFAULT_POST_LIMIT,
};
use crate::models::Resource;

/// User settings read from `~/.fetchdeck/config.yaml`
///
/// Every key is optional; missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub post_limit: usize,
    pub photo_limit: usize,
    /// Overall request timeout; unset keeps the HTTP client's default
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    pub keep_stale_on_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            post_limit: DEFAULT_POST_LIMIT,
            photo_limit: DEFAULT_PHOTO_LIMIT,
            request_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            keep_stale_on_refresh: false,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating {}", path.display()))?;
        Ok(config)
    }

    /// A zero limit would truncate every load to nothing
    fn validate(&self) -> Result<()> {
        ensure!(self.post_limit > 0, "post_limit must be at least 1");
        ensure!(self.photo_limit > 0, "photo_limit must be at least 1");
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Full endpoint URL for `resource`
    pub fn endpoint(&self, resource: Resource) -> String {
        resource.endpoint(&self.base_url)
    }
}
