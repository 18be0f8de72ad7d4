//! Single-slot mutual-exclusion executor.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// A coordination primitive that holds at most one pending task slot:
/// each submission invalidates the previous one, and only the most
/// recently submitted task's result is ever handed back.
///
/// There is no true cancellation. A superseded task runs to completion
/// and still consumes whatever resources it was using; its result is
/// simply dropped at the publication boundary. This is what makes the
/// primitive safe for racing navigations: a slow early submission can
/// never clobber a fast later one.
#[derive(Debug, Default)]
pub struct MutexExecutor {
    latest: AtomicU64,
}

impl MutexExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` to completion, returning `Some(output)` only if no
    /// newer task was submitted in the meantime, `None` otherwise.
    pub async fn run<T>(&self, task: impl Future<Output = T>) -> Option<T> {
        // The ticket is taken synchronously at submission, so submission
        // order decides the winner, not completion order.
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let output = task.await;
        (self.latest.load(Ordering::SeqCst) == ticket).then_some(output)
    }
}
