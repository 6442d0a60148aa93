pub mod members;
pub mod resolver;
pub mod aggregator;

pub use members::enumerate_members;
pub use resolver::{qualifies, ContributionResolver};
pub use aggregator::scan_organization;
