//! # Blog Shared
//!
//! Types exchanged between the browser and the server: the submitted post
//! form with its validation rules, listing query parameters and flash
//! notifications.

pub mod dto;
pub mod flash;
pub mod validation;

pub use dto::{ListQuery, PostForm};
pub use flash::{FlashLevel, FlashMessage};
pub use validation::FieldErrors;
