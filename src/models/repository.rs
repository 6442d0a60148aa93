use serde::{Deserialize, Serialize};

/// The subset of `/users/{login}/repos` entries needed to decide whether a
/// repository counts as an open source contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub license: Option<RepositoryLicense>,
    #[serde(default)]
    pub fork: bool,
    pub contributors_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryLicense {
    pub name: String,
}

impl Repository {
    pub fn license_name(&self) -> Option<&str> {
        self.license.as_ref().map(|l| l.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    // Anonymous contributors come back without a login.
    #[serde(default)]
    pub login: Option<String>,
    pub contributions: u64,
}
