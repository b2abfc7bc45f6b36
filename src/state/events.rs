//! Application event bus
//!
//! Cross-cutting signals between otherwise independent components. The
//! credit balance is the one shared value in the system: any component
//! that may have changed it emits [`AppEvent::CreditsInvalidated`] and
//! any component displaying it refetches on that signal.

use tokio::sync::broadcast;
use tracing::debug;

/// Fire-and-forget application events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Credit balances may have changed server-side; cached copies are stale
    CreditsInvalidated,
    /// The session token was rejected; emitted at most once per session
    SessionExpired,
}

/// Broadcast bus for [`AppEvent`]
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Emit an event; having no subscribers is not an error
    pub fn emit(&self, event: AppEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!(?event, receivers, "Application event emitted"),
            Err(_) => debug!(?event, "Application event emitted with no subscribers"),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
