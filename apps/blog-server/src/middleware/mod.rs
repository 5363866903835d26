//! Middleware modules.

pub mod csrf;
pub mod error;
pub mod flash;
