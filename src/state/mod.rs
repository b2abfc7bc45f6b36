//! Shared state management module
//!
//! This module handles the cross-cutting client state: the application
//! event bus, the current-user profile store, and the wired-up context.

pub mod context;
pub mod events;
pub mod profile;

// Re-export commonly used state components
pub use context::AppContext;
pub use events::{AppEvent, EventBus};
pub use profile::ProfileStore;
