//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the post model, pagination and the ports that the
//! infrastructure implements. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
