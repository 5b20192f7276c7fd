//! In-memory store used by `AppState::fake()` and the flow tests; no
//! Postgres required.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::answers::repo::AnswerStore;
use crate::answers::repo_types::{Answer, NewAnswer};
use crate::auth::repo::{SessionStore, UserStore};
use crate::auth::repo_types::{NewSession, NewUser, Session, User};
use crate::questions::repo::QuestionStore;
use crate::questions::repo_types::{NewQuestion, Question};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    // keyed by access token, the one lookup sessions need
    sessions: HashMap<String, Session>,
    questions: HashMap<Uuid, Question>,
    answers: HashMap<Uuid, Answer>,
}

/// One shared map behind a mutex, implementing all four store contracts the
/// way the Postgres schema behaves: unique username/email/token, cascades
/// on user and question deletion.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let inner = self.lock();
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let inner = self.lock();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let inner = self.lock();
        Ok(inner.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.username == user.username) {
            anyhow::bail!("unique violation: users.username");
        }
        if inner.users.values().any(|u| u.email == user.email) {
            anyhow::bail!("unique violation: users.email");
        }
        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            salt: user.salt,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            about_me: user.about_me,
            dob: user.dob,
            country: user.country,
            contact_number: user.contact_number,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        let existed = inner.users.remove(&id).is_some();
        if existed {
            // mirror the ON DELETE CASCADE chain
            inner.sessions.retain(|_, s| s.user_id != id);
            inner.answers.retain(|_, a| a.user_id != id);
            let gone: Vec<Uuid> = inner
                .questions
                .values()
                .filter(|q| q.user_id == id)
                .map(|q| q.id)
                .collect();
            for question_id in gone {
                inner.questions.remove(&question_id);
                inner.answers.retain(|_, a| a.question_id != question_id);
            }
        }
        Ok(existed)
    }
}

#[async_trait]
impl SessionStore for MemStore {
    async fn create(&self, session: NewSession) -> anyhow::Result<Session> {
        let mut inner = self.lock();
        if inner.sessions.contains_key(&session.access_token) {
            anyhow::bail!("unique violation: sessions.access_token");
        }
        let created = Session {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            access_token: session.access_token.clone(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
            signed_out_at: None,
        };
        inner.sessions.insert(session.access_token, created.clone());
        Ok(created)
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<Session>> {
        let inner = self.lock();
        Ok(inner.sessions.get(token).cloned())
    }

    async fn sign_out(&self, token: &str, now: OffsetDateTime) -> anyhow::Result<Option<Session>> {
        let mut inner = self.lock();
        match inner.sessions.get_mut(token) {
            Some(session) if session.is_active(now) => {
                session.signed_out_at = Some(now);
                Ok(Some(session.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl QuestionStore for MemStore {
    async fn create(&self, question: NewQuestion) -> anyhow::Result<Question> {
        let mut inner = self.lock();
        let created = Question {
            id: Uuid::new_v4(),
            user_id: question.user_id,
            content: question.content,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.questions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Question>> {
        let inner = self.lock();
        Ok(inner.questions.get(&id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Question>> {
        let inner = self.lock();
        let mut rows: Vec<Question> = inner.questions.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Question>> {
        let inner = self.lock();
        let mut rows: Vec<Question> = inner
            .questions
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_content(&self, id: Uuid, content: String) -> anyhow::Result<Option<Question>> {
        let mut inner = self.lock();
        match inner.questions.get_mut(&id) {
            Some(question) => {
                question.content = content;
                Ok(Some(question.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        let existed = inner.questions.remove(&id).is_some();
        if existed {
            inner.answers.retain(|_, a| a.question_id != id);
        }
        Ok(existed)
    }
}

#[async_trait]
impl AnswerStore for MemStore {
    async fn create(&self, answer: NewAnswer) -> anyhow::Result<Answer> {
        let mut inner = self.lock();
        let created = Answer {
            id: Uuid::new_v4(),
            user_id: answer.user_id,
            question_id: answer.question_id,
            content: answer.content,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.answers.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Answer>> {
        let inner = self.lock();
        Ok(inner.answers.get(&id).cloned())
    }

    async fn list_for_question(&self, question_id: Uuid) -> anyhow::Result<Vec<Answer>> {
        let inner = self.lock();
        let mut rows: Vec<Answer> = inner
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_content(&self, id: Uuid, content: String) -> anyhow::Result<Option<Answer>> {
        let mut inner = self.lock();
        match inner.answers.get_mut(&id) {
            Some(answer) => {
                answer.content = content;
                Ok(Some(answer.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.lock();
        Ok(inner.answers.remove(&id).is_some())
    }
}
