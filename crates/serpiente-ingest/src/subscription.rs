//! Scoped subscription handle for change-feed delivery tasks.

use tokio::task::JoinHandle;
use tracing::debug;

/// Guard over the background delivery tasks of a change-feed
/// subscription.
///
/// Acquired once at startup, released exactly once at teardown:
/// calling [`unsubscribe`](Self::unsubscribe) aborts the delivery
/// tasks and awaits their termination, and `Drop` aborts them as a
/// backstop so the subscription is released on every exit path,
/// including error exits. Once released, the feed's sender is gone and
/// no further notification can reach the ingest task.
#[derive(Debug)]
pub struct Subscription {
    tasks: Vec<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap the delivery tasks of a freshly acquired subscription.
    pub(crate) const fn new(tasks: Vec<JoinHandle<()>>) -> Self {
        Self { tasks }
    }

    /// Whether every delivery task has already terminated on its own.
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(JoinHandle::is_finished)
    }

    /// Release the subscription: abort the delivery tasks and wait for
    /// them to wind down.
    pub async fn unsubscribe(mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
            // Cancellation is the expected outcome here.
            let _ = task.await;
        }
        debug!("change-feed subscription released");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
