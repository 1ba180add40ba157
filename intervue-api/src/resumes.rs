//! Resume endpoints

use chrono::NaiveDateTime;
use intervue_core::IntervueResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Ack, ApiClient, Envelope};

/// Resume endpoint group
pub struct ResumesApi<'a> {
    pub(crate) client: &'a ApiClient,
}

/// Resume record (plain-text content, one per interviewee)
#[derive(Debug, Clone, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
struct ResumePayload<'a> {
    content: &'a str,
}

impl ResumesApi<'_> {
    /// Fetch the caller's own resume, `None` if they have not written one
    pub async fn my(&self) -> IntervueResult<Option<Resume>> {
        let envelope: Envelope<Option<Resume>> = self
            .client
            .send_json(self.client.request(Method::GET, "resumes/my"))
            .await?;
        Ok(envelope.data)
    }

    /// Create or replace the caller's own resume
    pub async fn save_my(&self, content: &str) -> IntervueResult<Resume> {
        let envelope: Envelope<Resume> = self
            .client
            .send_json(
                self.client
                    .request(Method::POST, "resumes/my")
                    .json(&ResumePayload { content }),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Delete the caller's own resume
    pub async fn delete_my(&self) -> IntervueResult<Ack> {
        self.client
            .send_json(self.client.request(Method::DELETE, "resumes/my"))
            .await
    }

    /// Fetch another user's resume (interviewer and admin only, enforced
    /// server-side)
    pub async fn for_user(&self, user_id: i64) -> IntervueResult<Resume> {
        let envelope: Envelope<Resume> = self
            .client
            .send_json(
                self.client
                    .request(Method::GET, &format!("resumes/user/{}", user_id)),
            )
            .await?;
        Ok(envelope.data)
    }
}
