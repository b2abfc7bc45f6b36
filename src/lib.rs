//! CampaignHub client core
//!
//! Client-side core of the CampaignHub bulk-messaging platform: typed
//! backend schemas, the REST API client, the campaign status lifecycle
//! controller, the debounced paginated list-query engine, campaign
//! composition, and the shared credit/profile store.

pub mod config;
pub mod models;
pub mod api;
pub mod lifecycle;
pub mod query;
pub mod compose;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampaignHubError, DraftError, Result};

// Re-export main components for easy access
pub use api::{ApiClient, SessionStore};
pub use compose::CampaignDraft;
pub use lifecycle::{LifecycleController, ReportUpload};
pub use models::{Campaign, CampaignStatus, Transaction, User};
pub use query::{EngineOptions, ListQuery, ListQueryEngine};
pub use state::{AppContext, AppEvent, EventBus, ProfileStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
