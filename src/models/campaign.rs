//! Campaign model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Lifecycle status of a campaign
///
/// The allowed transitions between states live in [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Pending => "pending",
            CampaignStatus::Processing => "processing",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = crate::utils::errors::CampaignHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CampaignStatus::Pending),
            "processing" => Ok(CampaignStatus::Processing),
            "completed" => Ok(CampaignStatus::Completed),
            "rejected" => Ok(CampaignStatus::Rejected),
            other => Err(crate::utils::errors::CampaignHubError::InvalidInput(
                format!("Unknown campaign status: {}", other),
            )),
        }
    }
}

/// Kind of an attached media asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Pdf,
    File,
}

/// Media asset attached to a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Storage locator at the media provider
    pub url: String,
    /// Provider-side identifier, e.g. a Cloudinary public id
    #[serde(default)]
    pub public_id: Option<String>,
}

/// Completion report artifact uploaded by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Storage key, e.g. "reports/abc.pdf"
    pub file_key: String,
    #[serde(default)]
    pub original_name: Option<String>,
}

/// Owning-user projection embedded in admin campaign listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignOwner {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A bulk message broadcast job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    /// Older records use "title" for the same field
    #[serde(alias = "title")]
    pub campaign_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    pub status: CampaignStatus,
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default, rename = "userId")]
    pub owner: Option<CampaignOwner>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Number of credits this campaign consumed at creation
    pub fn recipient_count(&self) -> usize {
        self.phone_numbers.len()
    }

    /// Newline-joined recipient list, generated entirely client-side
    /// for the downloadable plain-text artifact.
    pub fn recipients_export(&self) -> String {
        self.phone_numbers.join("\n")
    }
}

/// Paginated campaign listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPage {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    pub total_pages: u32,
    pub total_campaigns: u64,
}
