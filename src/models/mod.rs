pub mod member;
pub mod repository;
pub mod contribution;

pub use member::*;
pub use repository::*;
pub use contribution::*;
