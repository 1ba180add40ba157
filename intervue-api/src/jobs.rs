//! Job requirement endpoints

use chrono::NaiveDateTime;
use intervue_core::IntervueResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Ack, ApiClient};

/// Job requirement endpoint group
pub struct JobsApi<'a> {
    pub(crate) client: &'a ApiClient,
}

/// Job requirement record
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: i64,
    pub job_title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Create/update payload for a job requirement
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPayload {
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl JobsApi<'_> {
    /// List all job requirements
    pub async fn list(&self) -> IntervueResult<Vec<Job>> {
        self.client
            .send_json(self.client.request(Method::GET, "jobs/"))
            .await
    }

    /// Fetch a single job requirement
    pub async fn get(&self, job_id: i64) -> IntervueResult<Job> {
        self.client
            .send_json(self.client.request(Method::GET, &format!("jobs/{}", job_id)))
            .await
    }

    /// Create a job requirement
    pub async fn create(&self, payload: &JobPayload) -> IntervueResult<Job> {
        self.client
            .send_json(self.client.request(Method::POST, "jobs/").json(payload))
            .await
    }

    /// Update a job requirement
    pub async fn update(&self, job_id: i64, payload: &JobPayload) -> IntervueResult<Job> {
        self.client
            .send_json(
                self.client
                    .request(Method::PUT, &format!("jobs/{}", job_id))
                    .json(payload),
            )
            .await
    }

    /// Delete a job requirement
    pub async fn delete(&self, job_id: i64) -> IntervueResult<Ack> {
        self.client
            .send_json(
                self.client
                    .request(Method::DELETE, &format!("jobs/{}", job_id)),
            )
            .await
    }
}
