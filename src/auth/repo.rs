use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{NewSession, NewUser, Session, User};

/// Store contract for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: NewUser) -> anyhow::Result<User>;
    /// Returns false when no row matched. Deleting a user also removes
    /// their sessions, questions and answers.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Store contract for session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: NewSession) -> anyhow::Result<Session>;
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<Session>>;
    /// Compare-and-set: stamps `signed_out_at = now` only while the session
    /// is still active. Returns the closed session, or None when the token
    /// is unknown, already signed out, or expired.
    async fn sign_out(&self, token: &str, now: OffsetDateTime) -> anyhow::Result<Option<Session>>;
}

/// Postgres-backed [`UserStore`].
pub struct PgUsers {
    db: PgPool,
}

impl PgUsers {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUsers {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, salt, role, first_name, last_name,
                   about_me, dob, country, contact_number, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, salt, role, first_name, last_name,
                   about_me, dob, country, contact_number, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, salt, role, first_name, last_name,
                   about_me, dob, country, contact_number, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, salt, role,
                               first_name, last_name, about_me, dob, country, contact_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, username, email, password_hash, salt, role, first_name, last_name,
                      about_me, dob, country, contact_number, created_at
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.salt)
        .bind(user.role)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.about_me)
        .bind(user.dob)
        .bind(user.country)
        .bind(user.contact_number)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        // sessions, questions and answers go with the user via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Postgres-backed [`SessionStore`].
pub struct PgSessions {
    db: PgPool,
}

impl PgSessions {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessions {
    async fn create(&self, session: NewSession) -> anyhow::Result<Session> {
        let created = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, access_token, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, access_token, issued_at, expires_at, signed_out_at
            "#,
        )
        .bind(session.user_id)
        .bind(session.access_token)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, access_token, issued_at, expires_at, signed_out_at
            FROM sessions
            WHERE access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;
        Ok(session)
    }

    async fn sign_out(&self, token: &str, now: OffsetDateTime) -> anyhow::Result<Option<Session>> {
        // The WHERE clause is the whole concurrency story: two racing
        // signouts can both read an active session, but only one UPDATE
        // matches the still-open row.
        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions
            SET signed_out_at = $2
            WHERE access_token = $1 AND signed_out_at IS NULL AND expires_at > $2
            RETURNING id, user_id, access_token, issued_at, expires_at, signed_out_at
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.db)
        .await?;
        Ok(session)
    }
}
