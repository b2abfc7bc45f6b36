//! Shared test infrastructure
//!
//! Spins up a wiremock backend and wires a client against it, plus
//! fixture builders for the backend response shapes.

use std::sync::Arc;
use std::sync::Once;

use wiremock::MockServer;

use campaignhub::api::{ApiClient, SessionStore};
use campaignhub::models::{Campaign, CampaignStatus};
use campaignhub::state::EventBus;
use campaignhub::Settings;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// A mock backend together with a client wired against it
pub struct TestContext {
    pub server: MockServer,
    pub events: EventBus,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
}

impl TestContext {
    pub async fn new() -> Self {
        init_test_env();

        let server = MockServer::start().await;
        let events = EventBus::default();
        let session = Arc::new(SessionStore::new(events.clone()));

        let mut settings = Settings::default();
        settings.api.base_url = format!("{}/api", server.uri());
        let api = ApiClient::new(&settings, Arc::clone(&session)).expect("client construction");

        Self {
            server,
            events,
            session,
            api,
        }
    }

    /// Pre-arm the session with a token, skipping the login round trip
    pub async fn authenticated() -> Self {
        let ctx = Self::new().await;
        ctx.session.set_token("test-token".to_string());
        ctx
    }

    /// Number of requests the mock backend has seen
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

/// Backend-shaped campaign JSON
pub fn campaign_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "campaignName": "Summer Sale",
        "message": "50% off everything",
        "phoneNumbers": ["9876543210", "9123456780"],
        "media": [],
        "status": status,
        "createdAt": "2024-06-01T10:00:00Z"
    })
}

/// Parsed campaign fixture
pub fn campaign(id: &str, status: CampaignStatus) -> Campaign {
    serde_json::from_value(campaign_json(id, status.as_str())).expect("campaign fixture")
}

/// Backend-shaped user JSON
pub fn user_json(id: &str, credits: u64) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "name": "Priya",
        "email": "priya@example.com",
        "role": "user",
        "credits": credits
    })
}
