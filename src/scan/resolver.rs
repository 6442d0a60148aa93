use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::licenses::LicenseSet;
use crate::models::Repository;

/// A repository counts when it is a fork carrying a license from the
/// accepted set.
pub fn qualifies(repo: &Repository, licenses: &LicenseSet) -> bool {
    match repo.license_name() {
        Some(name) => repo.fork && licenses.contains(name),
        None => false,
    }
}

pub struct ContributionResolver<'a> {
    github: &'a GitHubClient,
    licenses: &'a LicenseSet,
    per_page: u32,
}

impl<'a> ContributionResolver<'a> {
    pub fn new(github: &'a GitHubClient, licenses: &'a LicenseSet, per_page: u32) -> Self {
        Self {
            github,
            licenses,
            per_page,
        }
    }

    /// Returns `(repository name, contributions)` for every qualifying
    /// repository of `login` where the count is positive, in listing order.
    pub async fn resolve_member(&self, login: &str) -> Result<Vec<(String, u64)>> {
        let repos = self.github.list_user_repos(login, self.per_page).await?;
        tracing::debug!("{} has {} repositories", login, repos.len());

        let mut resolved = Vec::new();
        for repo in repos {
            if !qualifies(&repo, self.licenses) {
                tracing::debug!(
                    "Skipping {}/{} (fork: {}, license: {:?})",
                    login,
                    repo.name,
                    repo.fork,
                    repo.license_name()
                );
                continue;
            }

            let count = self.contribution_count(login, &repo).await?;
            if count > 0 {
                resolved.push((repo.name, count));
            } else {
                tracing::debug!("{} has no contributions to {}", login, repo.name);
            }
        }

        Ok(resolved)
    }

    /// Walks the contributor list one page at a time and stops at the first
    /// page containing `login`. Pages after the match are never requested.
    pub async fn contribution_count(&self, login: &str, repo: &Repository) -> Result<u64> {
        let mut pages = self
            .github
            .contributor_pages(&repo.contributors_url, self.per_page);

        loop {
            let contributors = match pages.next_page().await {
                Ok(Some(contributors)) => contributors,
                Ok(None) => return Ok(0),
                Err(Error::Http { status, url }) if is_inaccessible(status) => {
                    tracing::warn!("Contributors of {} unavailable ({}): {}", repo.name, status, url);
                    return Ok(0);
                }
                Err(e) => return Err(e),
            };

            if let Some(contributor) = contributors
                .iter()
                .find(|c| c.login.as_deref() == Some(login))
            {
                return Ok(contributor.contributions);
            }
        }
    }
}

// 403 is also what GitHub sends when a contributor list is too large to list.
fn is_inaccessible(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::NOT_FOUND | StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS
    )
}
