use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::questions::repo_types::{NewQuestion, Question};

/// Store contract for question records.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn create(&self, question: NewQuestion) -> anyhow::Result<Question>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Question>>;
    async fn list_all(&self) -> anyhow::Result<Vec<Question>>;
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Question>>;
    /// Returns None when no row matched.
    async fn update_content(&self, id: Uuid, content: String) -> anyhow::Result<Option<Question>>;
    /// Returns false when no row matched. Answers to the question go with it.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Postgres-backed [`QuestionStore`].
pub struct PgQuestions {
    db: PgPool,
}

impl PgQuestions {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuestionStore for PgQuestions {
    async fn create(&self, question: NewQuestion) -> anyhow::Result<Question> {
        let created = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at
            "#,
        )
        .bind(question.user_id)
        .bind(question.content)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(question)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at
            FROM questions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at
            FROM questions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update_content(&self, id: Uuid, content: String) -> anyhow::Result<Option<Question>> {
        let updated = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET content = $2
            WHERE id = $1
            RETURNING id, user_id, content, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.db)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
