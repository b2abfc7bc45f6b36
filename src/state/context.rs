//! Application context
//!
//! Wires settings, session, profile store, API client, and the lifecycle
//! controller together, and hosts the operations that touch more than
//! one of them (login, campaign submission, credit grants).

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, CreateCampaignResponse, SessionStore};
use crate::compose::CampaignDraft;
use crate::config::Settings;
use crate::lifecycle::LifecycleController;
use crate::models::{AddCreditsRequest, AddCreditsResponse, Campaign, Transaction, User};
use crate::query::{EngineOptions, ListQueryEngine};
use crate::state::events::{AppEvent, EventBus};
use crate::state::profile::ProfileStore;
use crate::utils::errors::{CampaignHubError, Result};

/// Application-wide context containing shared stores and services
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub events: EventBus,
    pub session: Arc<SessionStore>,
    pub profile: Arc<ProfileStore>,
    pub api: ApiClient,
    pub lifecycle: LifecycleController,
}

impl AppContext {
    /// Create a new AppContext from validated settings
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let events = EventBus::default();
        let session = Arc::new(SessionStore::new(events.clone()));
        let profile = Arc::new(ProfileStore::new());
        let api = ApiClient::new(&settings, Arc::clone(&session))?;
        let lifecycle = LifecycleController::new(api.clone(), events.clone());

        Ok(Self {
            settings,
            events,
            session,
            profile,
            api,
            lifecycle,
        })
    }

    /// Authenticate and seed both session and profile stores
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let login = self.api.login(email, password).await?;
        self.profile.set(login.user.clone());
        Ok(login.user)
    }

    /// Clear the session and the cached profile
    pub fn logout(&self) {
        self.session.clear();
        self.profile.clear();
    }

    /// Submit a campaign draft, validated against the cached credit
    /// balance, and apply the returned debited profile.
    pub async fn create_campaign(&self, draft: CampaignDraft) -> Result<CreateCampaignResponse> {
        if !self.session.is_authenticated() {
            return Err(CampaignHubError::NotAuthenticated);
        }
        let response = self
            .api
            .create_campaign(draft, self.profile.credits())
            .await?;
        self.profile.set(response.user_doc.clone());
        self.events.emit(AppEvent::CreditsInvalidated);
        Ok(response)
    }

    /// Grant credits to a user and patch the cached admin balance
    pub async fn add_credits(&self, request: &AddCreditsRequest) -> Result<AddCreditsResponse> {
        let response = self.api.add_credits(request).await?;
        self.profile.update_credits(response.new_admin_balance);
        self.events.emit(AppEvent::CreditsInvalidated);
        Ok(response)
    }

    /// Refetch the profile from the backend now
    pub async fn sync_profile(&self) -> Result<()> {
        self.profile.sync(&self.api).await
    }

    /// Keep the cached balance in sync with credit-invalidation events
    pub fn spawn_credit_refresher(&self) -> JoinHandle<()> {
        self.profile.spawn_refresher(self.api.clone(), &self.events)
    }

    fn engine_options(&self) -> EngineOptions {
        EngineOptions::from(&self.settings.query)
    }

    pub fn admin_campaigns_engine(&self) -> ListQueryEngine<Campaign> {
        self.api.admin_campaigns_engine(self.engine_options())
    }

    pub fn user_campaigns_engine(&self) -> ListQueryEngine<Campaign> {
        self.api.user_campaigns_engine(self.engine_options())
    }

    pub fn transactions_engine(&self) -> ListQueryEngine<Transaction> {
        self.api.transactions_engine(self.engine_options())
    }
}
