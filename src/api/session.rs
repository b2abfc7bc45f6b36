//! Bearer-token session handling
//!
//! Holds the session token and implements the global 401 policy: the
//! first rejected token clears the session and emits a single
//! session-expired event; concurrent 401s are deduplicated.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use crate::state::events::{AppEvent, EventBus};

/// Shared session token store
#[derive(Debug)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
    expired_notice_sent: AtomicBool,
    events: EventBus,
}

impl SessionStore {
    pub fn new(events: EventBus) -> Self {
        Self {
            token: RwLock::new(None),
            expired_notice_sent: AtomicBool::new(false),
            events,
        }
    }

    /// Store a fresh token; re-arms the session-expired notice
    pub fn set_token(&self, token: String) {
        *self.token.write().expect("session lock poisoned") = Some(token);
        self.expired_notice_sent.store(false, Ordering::SeqCst);
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Forget the token, e.g. on explicit logout
    pub fn clear(&self) {
        *self.token.write().expect("session lock poisoned") = None;
    }

    /// Event bus shared with the rest of the application
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// React to a 401 from any endpoint. Clears the token and emits
    /// [`AppEvent::SessionExpired`] exactly once until the next login.
    pub fn handle_unauthorized(&self) {
        if !self.expired_notice_sent.swap(true, Ordering::SeqCst) {
            warn!("Session token rejected by backend, forcing logout");
            self.clear();
            self.events.emit(AppEvent::SessionExpired);
        }
    }
}
