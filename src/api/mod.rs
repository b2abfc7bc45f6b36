//! Backend API module
//!
//! This module contains the REST client for the CampaignHub backend:
//! transport core, session handling, and per-domain endpoint wrappers.

pub mod client;
pub mod session;
pub mod campaigns;
pub mod users;

// Re-export commonly used client types
pub use client::{ApiClient, FileDownload};
pub use session::SessionStore;
pub use campaigns::CreateCampaignResponse;
