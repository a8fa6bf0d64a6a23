//! Graceful shutdown handling.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels the background tasks and waits for each to finish.
pub async fn shutdown_gracefully(cancel: CancellationToken, tasks: Vec<JoinHandle<()>>) {
    cancel.cancel();
    for task in tasks {
        if let Err(e) = task.await {
            log::warn!("Background task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_shutdown_waits_for_every_task() {
        let cancel = CancellationToken::new();
        let stopped = Arc::new(AtomicUsize::new(0));
        let tasks = (0..3)
            .map(|_| {
                let cancel = cancel.clone();
                let stopped = Arc::clone(&stopped);
                tokio::spawn(async move {
                    cancel.cancelled().await;
                    stopped.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        shutdown_gracefully(cancel, tasks).await;
        assert_eq!(stopped.load(Ordering::SeqCst), 3);
    }
}
