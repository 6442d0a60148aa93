use std::time::Duration;

use reqwest::{header, Client};

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::Result;
use crate::github::paginator::{Pages, Paginator};
use crate::github::rate_limiter::RateLimiter;
use crate::models::{Contributor, OrgMember, Repository};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL, Duration::from_secs(30))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.access_token, &config.api_url, config.request_timeout)
    }

    pub fn with_base_url(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut auth = header::HeaderValue::from_str(&format!("token {}", token))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("contribscan/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn paginator(&self) -> Paginator<'_> {
        Paginator::new(&self.client, &self.rate_limiter)
    }

    pub async fn list_org_members(&self, org: &str, per_page: u32) -> Result<Vec<OrgMember>> {
        let url = format!("{}/orgs/{}/members?per_page={}", self.base_url, org, per_page);
        tracing::debug!("Fetching members of: {}", org);
        self.paginator().fetch_all(&url).await
    }

    pub async fn list_user_repos(&self, login: &str, per_page: u32) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?per_page={}", self.base_url, login, per_page);
        tracing::debug!("Fetching repositories for: {}", login);
        self.paginator().fetch_all(&url).await
    }

    /// Lazily walks the contributor list behind a repository's
    /// `contributors_url`.
    pub fn contributor_pages(&self, contributors_url: &str, per_page: u32) -> Pages<'_, Contributor> {
        let separator = if contributors_url.contains('?') { "&" } else { "?" };
        let url = format!("{}{}per_page={}", contributors_url, separator, per_page);
        self.paginator().pages(&url)
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
