//! Campaign endpoints
//!
//! Listing, detail, creation, status mutation, and artifact access for
//! campaigns.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use crate::api::client::{ApiClient, FileDownload};
use crate::compose::CampaignDraft;
use crate::lifecycle::ReportUpload;
use crate::models::{Campaign, CampaignPage, CampaignStatus, User};
use crate::query::{EngineOptions, ListPage, ListQuery, ListQueryEngine};
use crate::utils::errors::Result;

/// Response of POST /campaign/create
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignResponse {
    /// The submitting user with their debited credit balance
    #[serde(rename = "userDoc")]
    pub user_doc: User,
    #[serde(default)]
    pub campaign: Option<Campaign>,
}

/// Response of POST /admin/campaign/:id/report
#[derive(Debug, Clone, Deserialize)]
struct ReportUploadResponse {
    campaign: Campaign,
}

/// Response of GET /admin/campaign/:id/media/:mediaId
#[derive(Debug, Clone, Deserialize)]
struct MediaUrlResponse {
    url: String,
}

impl ApiClient {
    /// Admin listing across all users, filterable by status
    pub async fn admin_campaigns(&self, query: &ListQuery) -> Result<CampaignPage> {
        let params = [
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("status", query.filter.clone().unwrap_or_default()),
            ("search", query.search.clone()),
        ];
        self.get_json("admin/all-campaigns", &params).await
    }

    /// The current user's own campaigns
    pub async fn user_campaigns(&self, query: &ListQuery) -> Result<CampaignPage> {
        let params = [
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("search", query.search.clone()),
        ];
        self.get_json("user/campaign", &params).await
    }

    /// Full record including media and report, admin view
    pub async fn admin_campaign(&self, id: &str) -> Result<Campaign> {
        self.get_json(&format!("admin/campaign/{}", id), &[]).await
    }

    /// Full record including media and report, owner view
    pub async fn user_campaign(&self, id: &str) -> Result<Campaign> {
        self.get_json(&format!("user/campaign/{}", id), &[]).await
    }

    /// Request a non-terminal status change; the server re-validates the
    /// transition and returns the updated record.
    pub async fn set_campaign_status(&self, id: &str, status: CampaignStatus) -> Result<Campaign> {
        let url = self.endpoint(&format!("admin/campaign/{}/status", id))?;
        let body = serde_json::json!({ "status": status });
        let response = self
            .send_authorized(self.http().patch(url).json(&body))
            .await?;
        Ok(response.json().await?)
    }

    /// Upload the completion report. The server stores the artifact and
    /// flips the status to completed atomically; no separate status call
    /// is issued.
    pub async fn upload_report(&self, id: &str, report: ReportUpload) -> Result<Campaign> {
        let url = self.endpoint(&format!("admin/campaign/{}/report", id))?;
        let part = Part::bytes(report.bytes)
            .file_name(report.file_name)
            .mime_str(&report.content_type)?;
        let form = Form::new().part("file", part);
        let response = self
            .send_authorized(self.http().post(url).multipart(form))
            .await?;
        let body: ReportUploadResponse = response.json().await?;
        Ok(body.campaign)
    }

    /// Fetch a stored report for on-demand viewing. The result is valid
    /// for the current viewing session only and must not be cached.
    pub async fn status_file(&self, file_key: &str) -> Result<FileDownload> {
        // The key contains slashes ("reports/abc.pdf") and travels as a
        // single path segment.
        let encoded = urlencoding::encode(file_key);
        let url = self.endpoint(&format!("admin/statusFile/{}", encoded))?;
        let response = self.send_authorized(self.http().get(url)).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(FileDownload { bytes, content_type })
    }

    /// Resolve a short-lived signed URL for a media asset
    pub async fn media_url(&self, campaign_id: &str, media_id: &str) -> Result<String> {
        let body: MediaUrlResponse = self
            .get_json(&format!("admin/campaign/{}/media/{}", campaign_id, media_id), &[])
            .await?;
        Ok(body.url)
    }

    /// Submit a campaign draft. Validation runs against the available
    /// credit balance before any request is issued.
    pub async fn create_campaign(
        &self,
        draft: CampaignDraft,
        available_credits: u64,
    ) -> Result<CreateCampaignResponse> {
        draft.validate(available_credits)?;
        let name = draft.campaign_name().to_string();
        let recipients = draft.recipients().len();
        let form = draft.into_form()?;

        let url = self.endpoint("campaign/create")?;
        let response = self
            .send_authorized(self.http().post(url).multipart(form))
            .await?;
        let body: CreateCampaignResponse = response.json().await?;
        info!(
            campaign_name = %name,
            recipients = recipients,
            remaining_credits = body.user_doc.credits,
            "Campaign created"
        );
        Ok(body)
    }

    /// List query engine over the admin campaign listing
    pub fn admin_campaigns_engine(&self, options: EngineOptions) -> ListQueryEngine<Campaign> {
        let api = self.clone();
        ListQueryEngine::new(options, move |query| {
            let api = api.clone();
            async move { api.admin_campaigns(&query).await.map(ListPage::from) }
        })
    }

    /// List query engine over the current user's campaign listing
    pub fn user_campaigns_engine(&self, options: EngineOptions) -> ListQueryEngine<Campaign> {
        let api = self.clone();
        ListQueryEngine::new(options, move |query| {
            let api = api.clone();
            async move { api.user_campaigns(&query).await.map(ListPage::from) }
        })
    }
}
