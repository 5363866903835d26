//! Post store: connection management, entity and repository.

mod connections;
mod sqlite_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use sqlite_repo::SqlitePostRepository;
