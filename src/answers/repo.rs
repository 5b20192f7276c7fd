use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::answers::repo_types::{Answer, NewAnswer};

/// Store contract for answer records.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn create(&self, answer: NewAnswer) -> anyhow::Result<Answer>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Answer>>;
    async fn list_for_question(&self, question_id: Uuid) -> anyhow::Result<Vec<Answer>>;
    /// Returns None when no row matched.
    async fn update_content(&self, id: Uuid, content: String) -> anyhow::Result<Option<Answer>>;
    /// Returns false when no row matched.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Postgres-backed [`AnswerStore`].
pub struct PgAnswers {
    db: PgPool,
}

impl PgAnswers {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnswerStore for PgAnswers {
    async fn create(&self, answer: NewAnswer) -> anyhow::Result<Answer> {
        let created = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (user_id, question_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, question_id, content, created_at
            "#,
        )
        .bind(answer.user_id)
        .bind(answer.question_id)
        .bind(answer.content)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Answer>> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, user_id, question_id, content, created_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(answer)
    }

    async fn list_for_question(&self, question_id: Uuid) -> anyhow::Result<Vec<Answer>> {
        let rows = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, user_id, question_id, content, created_at
            FROM answers
            WHERE question_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update_content(&self, id: Uuid, content: String) -> anyhow::Result<Option<Answer>> {
        let updated = sqlx::query_as::<_, Answer>(
            r#"
            UPDATE answers
            SET content = $2
            WHERE id = $1
            RETURNING id, user_id, question_id, content, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.db)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
