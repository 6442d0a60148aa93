use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("GitHub rejected the access token")]
    Unauthorized,

    #[error("Rate limit exceeded, resets in {0} seconds")]
    RateLimited(u64),

    #[error("Request to {url} failed with {status}")]
    Http { status: StatusCode, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by callers to decide what to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    Transport,
    Export,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::InvalidHeader(_) => ErrorKind::Configuration,
            Error::OrganizationNotFound(_) => ErrorKind::NotFound,
            Error::Unauthorized
            | Error::RateLimited(_)
            | Error::Http { .. }
            | Error::Network(_) => ErrorKind::Transport,
            Error::Csv(_) | Error::Export { .. } | Error::Io(_) => ErrorKind::Export,
        }
    }

    /// Errors that invalidate every remaining request of a scan.
    pub fn is_systemic(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::RateLimited(_))
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Unauthorized => "The access token was rejected by GitHub.",
            Error::RateLimited(_) => "GitHub rate limit exhausted, try again later.",
            _ => match self.kind() {
                ErrorKind::Configuration => "Configuration is missing or invalid.",
                ErrorKind::NotFound => "The requested organization cannot be found.",
                ErrorKind::Transport => "Failed to fetch data from GitHub.",
                ErrorKind::Export => "Failed to download data.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_systemic_errors() {
        assert!(Error::Unauthorized.is_systemic());
        assert!(Error::RateLimited(60).is_systemic());
        let http = Error::Http {
            status: StatusCode::BAD_GATEWAY,
            url: "https://api.github.com/users/alice/repos".to_string(),
        };
        assert!(!http.is_systemic());
        assert_eq!(http.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_user_messages() {
        let not_found = Error::OrganizationNotFound("acme".to_string());
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(
            not_found.user_message(),
            "The requested organization cannot be found."
        );

        let export = Error::Export {
            path: PathBuf::from("/nope/acme.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(export.kind(), ErrorKind::Export);
        assert_eq!(export.user_message(), "Failed to download data.");
    }
}
