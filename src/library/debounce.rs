//! Trailing-edge debouncer for the library filter.
//!
//! Each call restarts the quiet period; only the last call within it fires.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run `action` after the quiet period unless another call supersedes it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, action: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) == ticket {
                action();
            }
        })
    }
}
