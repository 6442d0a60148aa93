use crate::error::Result;
use crate::github::GitHubClient;

/// Member logins of `org` in the order GitHub lists them.
///
/// An unknown organization surfaces as the raw `Error::Http` 404 from the
/// members endpoint; deciding that this means "not found" is left to
/// [`scan_organization`](crate::scan::scan_organization).
pub async fn enumerate_members(github: &GitHubClient, org: &str, per_page: u32) -> Result<Vec<String>> {
    let members = github.list_org_members(org, per_page).await?;
    Ok(members.into_iter().map(|m| m.login).collect())
}
