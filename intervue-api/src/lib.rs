//! Intervue API - typed client for the interview platform's REST API
//!
//! This crate wraps `reqwest` with the platform's session handling (bearer
//! attachment, client-side expiry inspection, 401/500 normalization) and
//! exposes one thin module per resource family: auth, jobs, interviews,
//! resumes and users.
//!
//! The wrapper never retries and never caches; every failure is terminal for
//! the originating call. Auth failures clear the injected session and
//! redirect through the injected [`Navigator`](intervue_session::Navigator).

pub mod auth;
pub mod client;
pub mod interviews;
pub mod jobs;
pub mod resumes;
pub mod users;

pub use auth::{AuthApi, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use client::{Ack, ApiClient, ApiClientConfig, Envelope};
pub use interviews::{
    Evaluation, EvaluationPayload, Interview, InterviewPayload, InterviewStatus, InterviewsApi,
    Question, QuestionPayload, QuestionType,
};
pub use jobs::{Job, JobPayload, JobsApi};
pub use resumes::{Resume, ResumesApi};
pub use users::UsersApi;
