//! Data models module
//!
//! This module contains the backend response schemas parsed at the
//! API boundary.

pub mod campaign;
pub mod user;
pub mod transaction;

// Re-export commonly used models
pub use campaign::{Campaign, CampaignOwner, CampaignPage, CampaignStatus, Media, MediaKind, Report};
pub use user::{AddCreditsRequest, AddCreditsResponse, CreateUserRequest, LoginRequest, LoginResponse, Role, User};
pub use transaction::{Transaction, TransactionPage, TransactionType, TransactionUser};
