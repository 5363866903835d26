//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! the SQLite post store (via SeaORM) and HMAC-based form protection.

pub mod csrf;
pub mod database;

pub use csrf::HmacCsrfProtection;
pub use database::{DatabaseConfig, SqlitePostRepository, connect};
