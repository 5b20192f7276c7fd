use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Question record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

/// Insert shape for a new question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub user_id: Uuid,
    pub content: String,
}
