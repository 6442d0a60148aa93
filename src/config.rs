use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 100;

#[derive(Clone)]
pub struct Config {
    pub access_token: String,
    pub api_url: String,
    pub concurrency_limit: usize,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings from a dotenv-formatted file.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            Error::Config(format!("Unable to read {}: {}", path.display(), e))
        })?;

        let mut values = HashMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                Error::Config(format!("Malformed entry in {}: {}", path.display(), e))
            })?;
            values.insert(key, value);
        }

        Self::from_lookup(|key| values.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let access_token = lookup("access_token")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("access_token is not set".to_string()))?;

        let api_url = lookup("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let concurrency_limit = lookup("CONCURRENCY_LIMIT")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(1);

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            access_token,
            api_url,
            concurrency_limit,
            request_timeout,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("concurrency_limit", &self.concurrency_limit)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Settings for a single scan of one organization.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub organization: String,
    pub per_page: u32,
    pub concurrency_limit: usize,
    pub show_progress: bool,
}

impl ScanConfig {
    pub fn new(organization: &str) -> Result<Self> {
        let organization = organization.trim();
        // GitHub account names are ASCII letters, digits and hyphens; the name
        // becomes both a URL path segment and a file name.
        if organization.is_empty()
            || !organization
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::Config(format!(
                "Invalid organization name: {:?}",
                organization
            )));
        }

        Ok(Self {
            organization: organization.to_string(),
            per_page: DEFAULT_PER_PAGE,
            concurrency_limit: 1,
            show_progress: false,
        })
    }

    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}
