//! Current-user profile store
//!
//! Single read model for the logged-in user and their credit balance.
//! The balance is an eventually consistent cache of server truth: it is
//! refreshed from `/user/profile` whenever a credit-invalidation event
//! arrives, and the backend remains the sole arbiter of correctness.

use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::User;
use crate::state::events::{AppEvent, EventBus};
use crate::utils::errors::Result;

/// Shared store of the current user profile
#[derive(Debug, Default)]
pub struct ProfileStore {
    user: RwLock<Option<User>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached profile
    pub fn set(&self, user: User) {
        *self.user.write().expect("profile lock poisoned") = Some(user);
    }

    /// Drop the cached profile, e.g. on logout
    pub fn clear(&self) {
        *self.user.write().expect("profile lock poisoned") = None;
    }

    /// Cached copy of the current user, if any
    pub fn get(&self) -> Option<User> {
        self.user.read().expect("profile lock poisoned").clone()
    }

    /// Cached credit balance; zero when nobody is logged in
    pub fn credits(&self) -> u64 {
        self.user
            .read()
            .expect("profile lock poisoned")
            .as_ref()
            .map(|u| u.credits)
            .unwrap_or(0)
    }

    /// Patch only the balance, keeping the rest of the cached profile
    pub fn update_credits(&self, credits: u64) {
        if let Some(user) = self.user.write().expect("profile lock poisoned").as_mut() {
            user.credits = credits;
        }
    }

    /// Refetch the profile from the backend and replace the cached copy
    pub async fn sync(&self, api: &ApiClient) -> Result<()> {
        let user = api.profile().await?;
        debug!(user_id = %user.id, credits = user.credits, "Profile synced");
        self.set(user);
        Ok(())
    }

    /// Background task that refetches the profile on every
    /// [`AppEvent::CreditsInvalidated`]. Sync failures are logged and the
    /// stale copy stays visible; the next invalidation retries.
    pub fn spawn_refresher(self: &Arc<Self>, api: ApiClient, bus: &EventBus) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(AppEvent::CreditsInvalidated) => {
                        if let Err(e) = store.sync(&api).await {
                            warn!(error = %e, "Credit sync failed");
                        }
                    }
                    Ok(AppEvent::SessionExpired) => store.clear(),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_user(credits: u64) -> User {
        User {
            id: "u1".to_string(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            role: Role::User,
            credits,
        }
    }

    #[test]
    fn credits_default_to_zero_when_logged_out() {
        let store = ProfileStore::new();
        assert_eq!(store.credits(), 0);
        store.set(sample_user(25));
        assert_eq!(store.credits(), 25);
        store.clear();
        assert_eq!(store.credits(), 0);
    }

    #[test]
    fn update_credits_patches_cached_profile() {
        let store = ProfileStore::new();
        store.set(sample_user(10));
        store.update_credits(40);
        assert_eq!(store.get().unwrap().credits, 40);
    }
}
