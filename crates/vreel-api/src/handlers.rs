//! Request handlers.

pub mod health;
pub mod themes;
pub mod videos;

pub use health::{health, ready};
pub use themes::list_themes;
pub use videos::{get_video_status, submit_video};
