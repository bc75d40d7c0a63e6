//! Application state.

use std::sync::Arc;

use vreel_content::PoetryLibrary;
use vreel_models::request::LineBounds;
use vreel_queue::{JobQueue, StatusStore};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub queue: Arc<JobQueue>,
    pub status: Arc<StatusStore>,
    pub poetry: Arc<PoetryLibrary>,
    pub line_bounds: LineBounds,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let queue = JobQueue::from_env()?;
        let status = StatusStore::from_env()?;
        let line_bounds = LineBounds::from_env();

        Ok(Self {
            config,
            queue: Arc::new(queue),
            status: Arc::new(status),
            poetry: Arc::new(PoetryLibrary::new(line_bounds)),
            line_bounds,
        })
    }
}
