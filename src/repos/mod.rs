pub mod bookmark_repo;
pub mod error;
pub mod user_repo;
