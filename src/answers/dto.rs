use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::answers::repo_types::Answer;

/// Request body for posting an answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Request body for editing an answer.
#[derive(Debug, Deserialize)]
pub struct AnswerEditRequest {
    pub content: String,
}

/// Response returned after create, edit and delete.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub status: &'static str,
}

/// One entry in an answer listing.
#[derive(Debug, Serialize)]
pub struct AnswerSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl From<Answer> for AnswerSummary {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id,
            user_id: answer.user_id,
            content: answer.content,
            created_at: answer.created_at,
        }
    }
}

/// Listing of a question's answers, with the question restated for context.
#[derive(Debug, Serialize)]
pub struct AnswersForQuestionResponse {
    pub question_id: Uuid,
    pub question_content: String,
    pub answers: Vec<AnswerSummary>,
}
