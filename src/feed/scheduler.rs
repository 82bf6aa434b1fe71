//! Cancellable feed task handle
//!
//! `start_feed()` on a store spawns its timer loops and returns a
//! [`FeedHandle`] owning them. Shutdown (explicit or on drop) aborts
//! every task and closes the simulated connection, so no tick can fire
//! after teardown. Leaking these timers across owners is the bug the
//! explicit handle exists to prevent.

use std::sync::Arc;
use tokio::task::JoinHandle;

use super::connection::FeedConnection;

/// Owner of a store's spawned timer tasks
#[derive(Debug)]
pub struct FeedHandle {
    tasks: Vec<JoinHandle<()>>,
    connection: Arc<FeedConnection>,
}

impl FeedHandle {
    pub fn new(connection: Arc<FeedConnection>) -> Self {
        Self {
            tasks: Vec::new(),
            connection,
        }
    }

    /// Track a spawned timer task
    pub fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    /// Number of tasks this handle owns
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Abort all timer tasks and close the simulated connection
    pub fn shutdown(mut self) {
        self.abort_all();
        self.connection.mark_closed();
        tracing::debug!("feed shut down");
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_ticks() {
        let connection = Arc::new(FeedConnection::open());
        let mut handle = FeedHandle::new(Arc::clone(&connection));

        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        handle.track(tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(100)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        // Paused clock auto-advances through the loop's sleeps
        tokio::time::sleep(Duration::from_millis(350)).await;
        let before = ticks.load(Ordering::SeqCst);
        assert!(before >= 3);

        handle.shutdown();
        assert!(!connection.is_open());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_tasks() {
        let connection = Arc::new(FeedConnection::open());
        let ticks = Arc::new(AtomicUsize::new(0));

        {
            let mut handle = FeedHandle::new(Arc::clone(&connection));
            let counter = Arc::clone(&ticks);
            handle.track(tokio::spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
