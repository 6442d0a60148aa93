pub mod client;
pub mod rate_limiter;
pub mod paginator;

pub use client::GitHubClient;
pub use rate_limiter::RateLimiter;
pub use paginator::{next_link, Page, Pages, Paginator};
