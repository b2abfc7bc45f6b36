//! Account, credit, and ledger endpoints

use tracing::info;

use crate::api::client::ApiClient;
use crate::models::{
    AddCreditsRequest, AddCreditsResponse, CreateUserRequest, LoginRequest, LoginResponse,
    Transaction, TransactionPage, User,
};
use crate::query::{EngineOptions, ListPage, ListQuery, ListQueryEngine};
use crate::utils::errors::{CampaignHubError, Result};
use crate::utils::helpers::is_valid_email;

impl ApiClient {
    /// Authenticate and store the bearer token for subsequent calls
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.endpoint("auth/login")?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.send_public(self.http().post(url).json(&body)).await?;
        let login: LoginResponse = response.json().await?;
        self.session().set_token(login.token.clone());
        info!(user_id = %login.user.id, role = ?login.user.role, "Logged in");
        Ok(login)
    }

    /// Provision a new user account (admin only). New accounts start with
    /// the user role and zero credits.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<()> {
        if !is_valid_email(&request.email) {
            return Err(CampaignHubError::InvalidInput(format!(
                "Invalid email address: {}",
                request.email
            )));
        }
        let url = self.endpoint("admin/create-user")?;
        self.send_authorized(self.http().post(url).json(request))
            .await?;
        info!(email = %request.email, "User provisioned");
        Ok(())
    }

    /// Transfer credits from the admin balance to a user (admin only)
    pub async fn add_credits(&self, request: &AddCreditsRequest) -> Result<AddCreditsResponse> {
        let url = self.endpoint("admin/add-credits")?;
        let response = self
            .send_authorized(self.http().post(url).json(request))
            .await?;
        let body: AddCreditsResponse = response.json().await?;
        info!(
            user_id = %request.user_id,
            credits = request.credits,
            new_admin_balance = body.new_admin_balance,
            "Credits granted"
        );
        Ok(body)
    }

    /// Current profile; the authoritative credit balance
    pub async fn profile(&self) -> Result<User> {
        self.get_json("user/profile", &[]).await
    }

    /// Paginated credit ledger, filterable by entry type
    pub async fn transactions(&self, query: &ListQuery) -> Result<TransactionPage> {
        let params = [
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("search", query.search.clone()),
            ("type", query.filter.clone().unwrap_or_default()),
        ];
        self.get_json("user/transactions", &params).await
    }

    /// List query engine over the transaction ledger
    pub fn transactions_engine(&self, options: EngineOptions) -> ListQueryEngine<Transaction> {
        let api = self.clone();
        ListQueryEngine::new(options, move |query| {
            let api = api.clone();
            async move { api.transactions(&query).await.map(ListPage::from) }
        })
    }
}
