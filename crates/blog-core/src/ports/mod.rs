//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod csrf;
mod repository;

pub use csrf::{CsrfProtection, CsrfToken};
pub use repository::PostRepository;
