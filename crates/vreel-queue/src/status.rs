//! Job status store.
//!
//! Terminal and in-flight job state lives in Redis string keys with a
//! TTL; the API polls it, the worker writes it. Records expire a day
//! after their last update.

use redis::AsyncCommands;
use tracing::debug;

use vreel_models::{JobId, JobStatus};

use crate::error::QueueResult;

/// TTL for status records in seconds (24 hours).
const STATUS_TTL_SECS: u64 = 86_400;

/// Redis-backed store of per-job status records.
pub struct StatusStore {
    client: redis::Client,
}

impl StatusStore {
    /// Create a new status store.
    pub fn new(redis_url: &str) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Create from environment variables.
    pub fn from_env() -> QueueResult<Self> {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        Self::new(&redis_url)
    }

    fn key(job_id: &JobId) -> String {
        format!("vreel:status:{}", job_id)
    }

    /// Write a status record, refreshing its TTL.
    pub async fn put(&self, status: &JobStatus) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(status)?;
        conn.set_ex::<_, _, ()>(Self::key(&status.job_id), payload, STATUS_TTL_SECS)
            .await?;
        debug!("Stored status {} for job {}", status.state.as_str(), status.job_id);
        Ok(())
    }

    /// Read a status record, if one exists.
    pub async fn get(&self, job_id: &JobId) -> QueueResult<Option<JobStatus>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(Self::key(job_id)).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        let id = JobId::from_string("abc");
        assert_eq!(StatusStore::key(&id), "vreel:status:abc");
    }
}
