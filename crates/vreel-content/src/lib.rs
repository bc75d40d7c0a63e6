//! Built-in themes, curated poetry and the local media library.
//!
//! Everything here is static or filesystem-backed; network content
//! acquisition is deliberately out of scope. Missing library directories
//! are normal and yield absence, which the render pipeline degrades to
//! its documented fallbacks.

pub mod error;
pub mod library;
pub mod poetry;
pub mod themes;

pub use error::{ContentError, ContentResult};
pub use library::MediaLibrary;
pub use poetry::{Poem, PoetryLibrary};
pub use themes::theme_config;
