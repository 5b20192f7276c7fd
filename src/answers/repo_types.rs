use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Answer record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

/// Insert shape for a new answer.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub content: String,
}
