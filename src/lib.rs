pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod licenses;
pub mod scan;
pub mod export;

pub use config::{Config, ScanConfig};
pub use error::{Error, ErrorKind, Result};
pub use github::GitHubClient;
pub use licenses::LicenseSet;
pub use models::{ContributionRecord, ContributionTable, ScanReport};
pub use scan::scan_organization;
