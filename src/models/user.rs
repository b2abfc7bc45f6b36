//! User model

use serde::{Deserialize, Serialize};

/// Role of a platform account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Platform account with its consumable credit balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Login identifier; an email address or a plain username
    pub email: String,
    pub role: Role,
    /// Authoritative cap on how many recipients a campaign may target
    #[serde(default)]
    pub credits: u64,
}

/// Credentials for POST /auth/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of POST /auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body for POST /admin/create-user
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body for POST /admin/add-credits
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCreditsRequest {
    pub user_id: String,
    pub credits: u64,
}

/// Response of POST /admin/add-credits
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCreditsResponse {
    /// The granting admin's balance after the transfer
    pub new_admin_balance: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_parses_backend_shape() {
        let raw = serde_json::json!({
            "_id": "u42",
            "name": "Priya",
            "email": "priya@example.com",
            "role": "user",
            "credits": 120
        });
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.credits, 120);
    }

    #[test]
    fn add_credits_request_uses_camel_case() {
        let body = AddCreditsRequest { user_id: "u42".into(), credits: 50 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userId"], "u42");
        assert_eq!(json["credits"], 50);
    }
}
