//! User endpoints

use intervue_core::{IntervueResult, Role, User};
use reqwest::Method;

use crate::client::{ApiClient, Envelope};

/// User endpoint group
pub struct UsersApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl UsersApi<'_> {
    /// List users, optionally filtered by role
    pub async fn list(&self, role: Option<Role>) -> IntervueResult<Vec<User>> {
        let mut request = self.client.request(Method::GET, "users");
        if let Some(role) = role {
            request = request.query(&[("role", role.to_string())]);
        }

        let envelope: Envelope<Vec<User>> = self.client.send_json(request).await?;
        Ok(envelope.data)
    }

    /// List all interviewee accounts
    pub async fn interviewees(&self) -> IntervueResult<Vec<User>> {
        self.list(Some(Role::Interviewee)).await
    }

    /// Fetch a single user
    pub async fn get(&self, user_id: i64) -> IntervueResult<User> {
        let envelope: Envelope<User> = self
            .client
            .send_json(
                self.client
                    .request(Method::GET, &format!("users/{}", user_id)),
            )
            .await?;
        Ok(envelope.data)
    }
}
