use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::questions::repo_types::Question;

/// Request body for creating a question.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub content: String,
}

/// Request body for editing a question.
#[derive(Debug, Deserialize)]
pub struct QuestionEditRequest {
    pub content: String,
}

/// Response returned after create, edit and delete.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub status: &'static str,
}

/// One entry in a question listing.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl From<Question> for QuestionSummary {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            user_id: question.user_id,
            content: question.content,
            created_at: question.created_at,
        }
    }
}
