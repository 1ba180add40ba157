//! Interview endpoints
//!
//! Covers the interview lifecycle (create, assign, start, complete,
//! status changes) plus nested questions, answers, scores and evaluations,
//! and the status / question-type constant tables.

use chrono::NaiveDateTime;
use intervue_core::{IntervueResult, User};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Ack, ApiClient, Envelope};
use crate::jobs::Job;

/// Interview lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Being prepared, not yet visible to the interviewee
    Draft,
    /// Handed to an interviewee, waiting to be started
    Assigned,
    InProgress,
    /// Answers are in, waiting for the interviewer's evaluation
    PendingEvaluation,
    Completed,
    /// Kept for compatibility with older records
    Evaluated,
}

impl InterviewStatus {
    pub const ALL: [InterviewStatus; 6] = [
        InterviewStatus::Draft,
        InterviewStatus::Assigned,
        InterviewStatus::InProgress,
        InterviewStatus::PendingEvaluation,
        InterviewStatus::Completed,
        InterviewStatus::Evaluated,
    ];

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            InterviewStatus::Draft => "Draft",
            InterviewStatus::Assigned => "Assigned",
            InterviewStatus::InProgress => "In progress",
            InterviewStatus::PendingEvaluation => "Pending evaluation",
            InterviewStatus::Completed => "Completed",
            InterviewStatus::Evaluated => "Evaluated",
        }
    }
}

impl std::fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterviewStatus::Draft => write!(f, "draft"),
            InterviewStatus::Assigned => write!(f, "assigned"),
            InterviewStatus::InProgress => write!(f, "in_progress"),
            InterviewStatus::PendingEvaluation => write!(f, "pending_evaluation"),
            InterviewStatus::Completed => write!(f, "completed"),
            InterviewStatus::Evaluated => write!(f, "evaluated"),
        }
    }
}

impl std::str::FromStr for InterviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InterviewStatus::Draft),
            "assigned" => Ok(InterviewStatus::Assigned),
            "in_progress" => Ok(InterviewStatus::InProgress),
            "pending_evaluation" => Ok(InterviewStatus::PendingEvaluation),
            "completed" => Ok(InterviewStatus::Completed),
            "evaluated" => Ok(InterviewStatus::Evaluated),
            _ => Err(format!("Unknown interview status: {}", s)),
        }
    }
}

/// Question formats an interview can contain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Text,
    Code,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::Text,
        QuestionType::Code,
    ];

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "Single choice",
            QuestionType::MultipleChoice => "Multiple choice",
            QuestionType::Text => "Free text",
            QuestionType::Code => "Code",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "single_choice"),
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::Text => write!(f, "text"),
            QuestionType::Code => write!(f, "code"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_choice" => Ok(QuestionType::SingleChoice),
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "text" => Ok(QuestionType::Text),
            "code" => Ok(QuestionType::Code),
            _ => Err(format!("Unknown question type: {}", s)),
        }
    }
}

/// Interview record
#[derive(Debug, Clone, Deserialize)]
pub struct Interview {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub job_requirement_id: i64,
    pub interviewer_id: i64,
    #[serde(default)]
    pub interviewee_id: Option<i64>,
    pub status: InterviewStatus,
    #[serde(default)]
    pub question_count: Option<i64>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    /// Nested records, present on detail responses only
    #[serde(default)]
    pub job_requirement: Option<Job>,
    #[serde(default)]
    pub interviewer: Option<User>,
    #[serde(default)]
    pub interviewee: Option<User>,
}

/// Create/update payload for an interview
#[derive(Debug, Clone, Default, Serialize)]
pub struct InterviewPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub job_requirement_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<i64>,
}

/// Interview question record.
///
/// Interviewees receive a reduced view without the reference answer or
/// scoring fields, so everything beyond the text is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: i64,
    pub interview_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
    #[serde(default)]
    pub reference_answer: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub order_index: Option<i64>,
    #[serde(default)]
    pub candidate_answer: Option<String>,
    #[serde(default)]
    pub actual_score: Option<i64>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create/update payload for a question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPayload {
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

/// Interview evaluation record
#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    pub interview_id: i64,
    pub evaluator_id: i64,
    pub total_score: i64,
    pub max_score: i64,
    #[serde(default)]
    pub overall_comments: Option<String>,
    #[serde(default)]
    pub skill_ratings: Option<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Option<String>,
    pub is_passed: bool,
    #[serde(default)]
    pub is_finalized: Option<bool>,
    #[serde(default)]
    pub decision_reason: Option<String>,
    #[serde(default)]
    pub evaluated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create/update payload for an evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationPayload {
    pub total_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_ratings: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    pub is_passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusPayload {
    status: InterviewStatus,
}

#[derive(Debug, Serialize)]
struct AssignPayload {
    interviewee_id: i64,
}

#[derive(Debug, Serialize)]
struct AnswerPayload<'a> {
    answer: &'a str,
}

#[derive(Debug, Serialize)]
struct ScorePayload<'a> {
    score: i64,
    comments: &'a str,
}

/// Interview endpoint group
pub struct InterviewsApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl InterviewsApi<'_> {
    /// List interviews created by the caller, optionally filtered by status
    pub async fn list(&self, status: Option<InterviewStatus>) -> IntervueResult<Vec<Interview>> {
        let mut request = self.client.request(Method::GET, "interviews/");
        if let Some(status) = status {
            request = request.query(&[("status", status.to_string())]);
        }

        let envelope: Envelope<Vec<Interview>> = self.client.send_json(request).await?;
        Ok(envelope.data)
    }

    /// List interviews assigned to the caller, optionally filtered by status
    pub async fn my_interviews(
        &self,
        status: Option<InterviewStatus>,
    ) -> IntervueResult<Vec<Interview>> {
        let mut request = self.client.request(Method::GET, "interviews/my-interviews");
        if let Some(status) = status {
            request = request.query(&[("status", status.to_string())]);
        }

        let envelope: Envelope<Vec<Interview>> = self.client.send_json(request).await?;
        Ok(envelope.data)
    }

    /// Create an interview (the caller becomes its interviewer)
    pub async fn create(&self, payload: &InterviewPayload) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(
                self.client
                    .request(Method::POST, "interviews/")
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Fetch a single interview with its nested records
    pub async fn get(&self, interview_id: i64) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(
                self.client
                    .request(Method::GET, &format!("interviews/{}", interview_id)),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Update an interview
    pub async fn update(
        &self,
        interview_id: i64,
        payload: &InterviewPayload,
    ) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(
                self.client
                    .request(Method::PUT, &format!("interviews/{}", interview_id))
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Delete an interview
    pub async fn delete(&self, interview_id: i64) -> IntervueResult<Ack> {
        self.client
            .send_json(
                self.client
                    .request(Method::DELETE, &format!("interviews/{}", interview_id)),
            )
            .await
    }

    /// Hand an interview to an interviewee
    pub async fn assign(&self, interview_id: i64, interviewee_id: i64) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(
                self.client
                    .request(Method::POST, &format!("interviews/{}/assign", interview_id))
                    .json(&AssignPayload { interviewee_id }),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Move an interview to a new lifecycle state
    pub async fn update_status(
        &self,
        interview_id: i64,
        status: InterviewStatus,
    ) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(
                self.client
                    .request(Method::PUT, &format!("interviews/{}/status", interview_id))
                    .json(&StatusPayload { status }),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Start an assigned interview (interviewee side)
    pub async fn start(&self, interview_id: i64) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(
                self.client
                    .request(Method::POST, &format!("interviews/{}/start", interview_id)),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Complete a started interview (interviewee side)
    pub async fn complete(&self, interview_id: i64) -> IntervueResult<Interview> {
        let envelope: Envelope<Interview> = self
            .client
            .send_json(self.client.request(
                Method::POST,
                &format!("interviews/{}/complete", interview_id),
            ))
            .await?;
        Ok(envelope.data)
    }

    /// List an interview's questions.
    ///
    /// Interviewees get the reduced candidate view, decided server-side.
    pub async fn questions(&self, interview_id: i64) -> IntervueResult<Vec<Question>> {
        let envelope: Envelope<Vec<Question>> = self
            .client
            .send_json(self.client.request(
                Method::GET,
                &format!("interviews/{}/questions", interview_id),
            ))
            .await?;
        Ok(envelope.data)
    }

    /// Add a question to an interview
    pub async fn add_question(
        &self,
        interview_id: i64,
        payload: &QuestionPayload,
    ) -> IntervueResult<Question> {
        let envelope: Envelope<Question> = self
            .client
            .send_json(
                self.client
                    .request(
                        Method::POST,
                        &format!("interviews/{}/questions", interview_id),
                    )
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Update a question
    pub async fn update_question(
        &self,
        question_id: i64,
        payload: &QuestionPayload,
    ) -> IntervueResult<Question> {
        let envelope: Envelope<Question> = self
            .client
            .send_json(
                self.client
                    .request(
                        Method::PUT,
                        &format!("interviews/questions/{}", question_id),
                    )
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Delete a question
    pub async fn delete_question(&self, question_id: i64) -> IntervueResult<Ack> {
        self.client
            .send_json(self.client.request(
                Method::DELETE,
                &format!("interviews/questions/{}", question_id),
            ))
            .await
    }

    /// Submit the candidate's answer to a question
    pub async fn submit_answer(&self, question_id: i64, answer: &str) -> IntervueResult<Question> {
        let envelope: Envelope<Question> = self
            .client
            .send_json(
                self.client
                    .request(
                        Method::POST,
                        &format!("interviews/questions/{}/answer", question_id),
                    )
                    .json(&AnswerPayload { answer }),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Score an answered question
    pub async fn score_question(
        &self,
        question_id: i64,
        score: i64,
        comments: &str,
    ) -> IntervueResult<Question> {
        let envelope: Envelope<Question> = self
            .client
            .send_json(
                self.client
                    .request(
                        Method::POST,
                        &format!("interviews/questions/{}/score", question_id),
                    )
                    .json(&ScorePayload { score, comments }),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Fetch an interview's evaluation
    pub async fn evaluation(&self, interview_id: i64) -> IntervueResult<Evaluation> {
        let envelope: Envelope<Evaluation> = self
            .client
            .send_json(self.client.request(
                Method::GET,
                &format!("interviews/{}/evaluation", interview_id),
            ))
            .await?;
        Ok(envelope.data)
    }

    /// Create an interview's evaluation
    pub async fn create_evaluation(
        &self,
        interview_id: i64,
        payload: &EvaluationPayload,
    ) -> IntervueResult<Evaluation> {
        let envelope: Envelope<Evaluation> = self
            .client
            .send_json(
                self.client
                    .request(
                        Method::POST,
                        &format!("interviews/{}/evaluation", interview_id),
                    )
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Update an existing evaluation
    pub async fn update_evaluation(
        &self,
        evaluation_id: i64,
        payload: &EvaluationPayload,
    ) -> IntervueResult<Evaluation> {
        let envelope: Envelope<Evaluation> = self
            .client
            .send_json(
                self.client
                    .request(
                        Method::PUT,
                        &format!("interviews/evaluation/{}", evaluation_id),
                    )
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_names_round_trip() {
        for status in InterviewStatus::ALL {
            assert_eq!(InterviewStatus::from_str(&status.to_string()), Ok(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
        assert!(InterviewStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(InterviewStatus::Draft.label(), "Draft");
        assert_eq!(InterviewStatus::InProgress.label(), "In progress");
        assert_eq!(
            InterviewStatus::PendingEvaluation.label(),
            "Pending evaluation"
        );
    }

    #[test]
    fn test_question_type_wire_names_round_trip() {
        for kind in QuestionType::ALL {
            assert_eq!(QuestionType::from_str(&kind.to_string()), Ok(kind));
        }
        assert_eq!(
            serde_json::to_string(&QuestionType::SingleChoice).unwrap(),
            "\"single_choice\""
        );
        assert!(QuestionType::from_str("essay").is_err());
    }

    #[test]
    fn test_interview_parses_detail_response() {
        let json = r#"{
            "id": 3,
            "title": "Backend engineer screen",
            "description": null,
            "job_requirement_id": 9,
            "interviewer_id": 2,
            "interviewee_id": 5,
            "status": "pending_evaluation",
            "question_count": 5,
            "started_at": "2024-05-01T10:00:00",
            "completed_at": "2024-05-01T11:02:13",
            "created_at": "2024-04-28T08:00:00",
            "updated_at": "2024-05-01T11:02:13",
            "job_requirement": {"id": 9, "job_title": "Backend engineer"},
            "interviewer": {"id": 2, "username": "ada", "email": "ada@example.com", "role": "interviewer"},
            "interviewee": {"id": 5, "username": "lin", "email": "lin@example.com", "role": "interviewee"}
        }"#;

        let interview: Interview = serde_json::from_str(json).unwrap();
        assert_eq!(interview.status, InterviewStatus::PendingEvaluation);
        assert_eq!(interview.interviewee_id, Some(5));
        assert_eq!(
            interview.job_requirement.as_ref().map(|j| j.id),
            Some(9)
        );
        assert!(interview.started_at.is_some());
    }

    #[test]
    fn test_question_parses_candidate_view() {
        // Candidate view omits the reference answer and scoring fields
        let json = r#"{
            "id": 11,
            "interview_id": 3,
            "question_text": "Explain ownership in Rust",
            "question_type": "text",
            "options": null,
            "score": 10,
            "order_index": 1,
            "candidate_answer": null
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.question_type, QuestionType::Text);
        assert_eq!(question.reference_answer, None);
        assert_eq!(question.actual_score, None);
    }

    #[test]
    fn test_payload_omits_absent_fields() {
        let payload = InterviewPayload {
            title: "Screen".to_string(),
            job_requirement_id: 9,
            ..Default::default()
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"title\""));
        assert!(!json.contains("interviewee_id"));
        assert!(!json.contains("question_count"));
    }
}
