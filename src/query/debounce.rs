//! Restartable debounce timer
//!
//! Each call schedules the given closure after a fixed quiet period and
//! cancels whatever was previously scheduled, so a burst of rapid edits
//! runs the closure at most once.

use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable single-slot debounce timer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` after the quiet period, replacing any pending run.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });

        let mut pending = self.pending.lock().expect("debounce lock poisoned");
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the pending run, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().expect("debounce lock poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
