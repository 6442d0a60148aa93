use serde::{Deserialize, Serialize};

/// One entry of `/orgs/{org}/members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgMember {
    pub login: String,
}
