//! Error handling for the CampaignHub client
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for CampaignHub client operations
#[derive(Error, Debug)]
pub enum CampaignHubError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// The backend answered 401; the session has been cleared.
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("A completion report must be attached before marking a campaign completed")]
    ReportRequired,

    #[error("Campaign draft error: {0}")]
    Draft(#[from] DraftError),

    /// Non-2xx backend response; `message` is surfaced to the user verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Validation errors raised while composing a campaign draft
#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Campaign name required")]
    NameRequired,

    #[error("Message required")]
    MessageRequired,

    #[error("Add phone numbers")]
    NoRecipients,

    #[error("Total numbers exceed available credits ({requested} > {available})")]
    ExceedsCredits { requested: u64, available: u64 },

    #[error("Images must be JPEG and at most {max_bytes} bytes: {file_name}")]
    InvalidImage { file_name: String, max_bytes: usize },

    #[error("Attachment exceeds {max_bytes} bytes: {file_name}")]
    AttachmentTooLarge { file_name: String, max_bytes: usize },
}

/// Result type alias for CampaignHub client operations
pub type Result<T> = std::result::Result<T, CampaignHubError>;

impl CampaignHubError {
    /// Check if the error is recoverable by manually re-triggering the action
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampaignHubError::Http(_) => true,
            CampaignHubError::Server { status, .. } => *status >= 500,
            CampaignHubError::Serialization(_) => false,
            CampaignHubError::UrlParse(_) => false,
            CampaignHubError::Config(_) => false,
            CampaignHubError::NotAuthenticated => false,
            CampaignHubError::SessionExpired => false,
            CampaignHubError::InvalidStateTransition { .. } => false,
            CampaignHubError::ReportRequired => false,
            CampaignHubError::Draft(_) => false,
            CampaignHubError::InvalidInput(_) => false,
        }
    }

    /// Whether the error should end the current session
    pub fn is_session_expiry(&self) -> bool {
        matches!(self, CampaignHubError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_backend_message_verbatim() {
        let err = CampaignHubError::Server {
            status: 403,
            message: "You are not allowed to update this campaign".to_string(),
        };
        assert_eq!(err.to_string(), "You are not allowed to update this campaign");
    }

    #[test]
    fn transition_error_names_both_states() {
        let err = CampaignHubError::InvalidStateTransition {
            from: "completed".to_string(),
            to: "pending".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid status transition: completed -> pending");
    }

    #[test]
    fn recoverability_follows_taxonomy() {
        assert!(CampaignHubError::Server { status: 502, message: "bad gateway".into() }.is_recoverable());
        assert!(!CampaignHubError::Server { status: 403, message: "denied".into() }.is_recoverable());
        assert!(!CampaignHubError::ReportRequired.is_recoverable());
        assert!(!CampaignHubError::Draft(DraftError::NoRecipients).is_recoverable());
    }
}
