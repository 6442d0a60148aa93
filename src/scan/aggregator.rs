use futures::{stream, FutureExt, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::licenses::LicenseSet;
use crate::models::{ContributionTable, ScanReport, SkippedMember};
use crate::scan::members::enumerate_members;
use crate::scan::resolver::ContributionResolver;

/// Scans every member of `config.organization` and collects their open
/// source contributions.
///
/// A 404 from the members listing becomes [`Error::OrganizationNotFound`].
///
/// Members are resolved up to `config.concurrency_limit` at a time, but each
/// member's records are appended whole and in enumeration order, so the
/// resulting table does not depend on the limit. A member whose resolution
/// fails is recorded in [`ScanReport::skipped`]; an authorization or rate
/// limit failure aborts the scan.
pub async fn scan_organization(
    github: &GitHubClient,
    licenses: &LicenseSet,
    config: &ScanConfig,
) -> Result<ScanReport> {
    let org = config.organization.as_str();

    tracing::info!("Fetching members of: {}", org);
    let members = match enumerate_members(github, org, config.per_page).await {
        Err(Error::Http { status, .. }) if status == StatusCode::NOT_FOUND => {
            return Err(Error::OrganizationNotFound(org.to_string()));
        }
        other => other?,
    };
    tracing::info!("Found {} members", members.len());

    let resolver = ContributionResolver::new(github, licenses, config.per_page);
    let pb = progress_bar(members.len() as u64, config.show_progress);

    let mut table = ContributionTable::new();
    let mut skipped = Vec::new();

    let resolver = &resolver;
    let mut results = stream::iter(members.iter())
        .map(move |login| resolver.resolve_member(login).map(move |result| (login, result)))
        .buffered(config.concurrency_limit.max(1));

    while let Some((login, result)) = results.next().await {
        pb.inc(1);
        match result {
            Ok(repos) => {
                tracing::info!("{}: {} open source repositories", login, repos.len());
                table.append_member(login, repos);
            }
            Err(e) if e.is_systemic() => {
                pb.abandon();
                tracing::error!("Aborting scan of {} at {}: {}", org, login, e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Skipping member {}: {}", login, e);
                skipped.push(SkippedMember {
                    login: login.clone(),
                    reason: e.user_message().to_string(),
                });
            }
        }
    }

    pb.finish_and_clear();

    if let Some(remaining) = github.rate_limiter().remaining() {
        tracing::info!("Rate limit remaining after scan: {}", remaining);
    }
    tracing::info!(
        "Scan of {} complete: {} records, {} members skipped",
        org,
        table.len(),
        skipped.len()
    );

    Ok(ScanReport {
        organization: org.to_string(),
        table,
        skipped,
    })
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} members")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
