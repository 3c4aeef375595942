// File: src/config.rs
use crate::paths::AppPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TICKET_URL: &str = "https://shop.comedyuo.com";
pub const DEFAULT_WAITLIST_URL: &str = "https://app.comedyuo.com/waitlist";

/// Overrides `api_url` from the file when set and non-empty.
pub const ENV_API_URL: &str = "SHOWBILL_API_URL";

/// Read once at startup and handed to whoever needs it. Nothing writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub allow_insecure_certs: bool,
    /// Unset means requests may hang forever, which leaves the page loading.
    pub request_timeout_secs: Option<u64>,
    pub ticket_url: String,
    pub waitlist_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            allow_insecure_certs: false,
            request_timeout_secs: None,
            ticket_url: DEFAULT_TICKET_URL.to_string(),
            waitlist_url: DEFAULT_WAITLIST_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads the platform config file (if any), then applies the environment.
    pub fn load() -> Result<Self> {
        let config = match AppPaths::config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_api_url_override(std::env::var(ENV_API_URL).ok()))
    }

    /// Loads `path` without looking at the environment. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value
            && !url.trim().is_empty()
        {
            self.api_url = url.trim().to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}
