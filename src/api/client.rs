//! CampaignHub REST client core
//!
//! HTTP client setup, bearer authentication, response status policy,
//! and error-body parsing shared by every endpoint wrapper.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::session::SessionStore;
use crate::config::Settings;
use crate::utils::errors::{CampaignHubError, Result};
use crate::utils::logging::log_api_error;

/// Error envelope used by the backend for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Raw artifact bytes fetched for on-demand viewing
///
/// Holds a short-lived copy for the current viewing session only; callers
/// must not cache it beyond that.
#[derive(Debug, Clone)]
pub struct FileDownload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Client for the CampaignHub backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(settings: &Settings, session: Arc<SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent("CampaignHub-Client/0.1")
            .build()
            .map_err(CampaignHubError::Http)?;

        // A trailing slash keeps Url::join from eating the last path segment.
        let mut base = settings.api.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        Ok(Self { http, base_url, session })
    }

    /// Session store shared with the rest of the application
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Resolve a path relative to the configured base URL
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send a request with the session bearer token attached
    pub(crate) async fn send_authorized(&self, request: RequestBuilder) -> Result<Response> {
        let token = self
            .session
            .token()
            .ok_or(CampaignHubError::NotAuthenticated)?;
        let response = request.bearer_auth(token).send().await?;
        self.check_status(response).await
    }

    /// Send an unauthenticated request (login only)
    pub(crate) async fn send_public(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        self.check_status(response).await
    }

    /// Apply the global response policy: 401 forces a deduplicated logout,
    /// any other non-2xx surfaces the backend message verbatim.
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.handle_unauthorized();
            return Err(CampaignHubError::SessionExpired);
        }

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let fallback = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or(fallback);

        log_api_error(&url, &message, status.canonical_reason());
        Err(CampaignHubError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Authorized GET returning a parsed JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self
            .send_authorized(self.http.get(url).query(query))
            .await?;
        Ok(response.json().await?)
    }
}
