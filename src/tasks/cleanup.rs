//! TTL Cleanup Task
//!
//! Background task that periodically purges expired entries from the
//! in-process cache backend. Expiry is enforced on read regardless; this
//! only reclaims memory for keys nobody asks for again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryBackend;

/// Spawns a background task that purges expired entries every `cleanup_interval_secs`.
///
/// Returns the JoinHandle so the caller can abort it during shutdown.
pub fn spawn_cleanup_task(backend: MemoryBackend, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.cleanup_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheBackend;

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_removes_expired_entries() {
        let backend = MemoryBackend::new();
        backend
            .set("expire_soon", "value".to_string(), Duration::from_secs(1))
            .await
            .unwrap();
        backend
            .set("long_lived", "value".to_string(), Duration::from_secs(3600))
            .await
            .unwrap();

        let handle = spawn_cleanup_task(backend.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Purged without any read touching the key
        assert_eq!(backend.len().await, 1);
        assert!(backend.get("long_lived").await.unwrap().is_some());

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(MemoryBackend::new(), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
