//! Auth endpoints

use intervue_core::{IntervueResult, Role, User};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;

/// Auth endpoint group
pub struct AuthApi<'a> {
    pub(crate) client: &'a ApiClient,
}

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to interviewee server-side when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

impl AuthApi<'_> {
    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> IntervueResult<RegisterResponse> {
        self.client
            .send_json(
                self.client
                    .request(Method::POST, "auth/register")
                    .json(request),
            )
            .await
    }

    /// Exchange credentials for a bearer token and user record.
    ///
    /// Populating the session with the result is the caller's decision.
    pub async fn login(&self, request: &LoginRequest) -> IntervueResult<LoginResponse> {
        self.client
            .send_json(self.client.request(Method::POST, "auth/login").json(request))
            .await
    }

    /// Fetch the authenticated user's own record
    pub async fn me(&self) -> IntervueResult<User> {
        self.client
            .send_json(self.client.request(Method::GET, "auth/me"))
            .await
    }
}
