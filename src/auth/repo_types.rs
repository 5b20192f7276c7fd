use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed role set. Signup always creates `Nonadmin`; the role never
/// changes through this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Nonadmin,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 digest, not exposed in JSON
    #[serde(skip_serializing)]
    pub salt: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub country: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Insert shape for signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub country: Option<String>,
    pub contact_number: Option<String>,
}

/// One signin. Sessions are an append-only audit trail: a record is never
/// deleted and is mutated at most once, when `signed_out_at` is stamped.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub issued_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub signed_out_at: Option<OffsetDateTime>,
}

impl Session {
    /// Active = not signed out and not past expiry.
    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        self.signed_out_at.is_none() && now < self.expires_at
    }
}

/// Insert shape for a freshly minted session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: Uuid,
    pub access_token: String,
    pub issued_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn session(expires_in: Duration, signed_out: bool) -> Session {
        let now = OffsetDateTime::now_utc();
        Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            access_token: "tok".into(),
            issued_at: now - Duration::hours(1),
            expires_at: now + expires_in,
            signed_out_at: signed_out.then_some(now),
        }
    }

    #[test]
    fn fresh_session_is_active() {
        let s = session(Duration::hours(7), false);
        assert!(s.is_active(OffsetDateTime::now_utc()));
    }

    #[test]
    fn signed_out_session_is_not_active() {
        let s = session(Duration::hours(7), true);
        assert!(!s.is_active(OffsetDateTime::now_utc()));
    }

    #[test]
    fn expired_session_is_not_active() {
        let s = session(Duration::hours(-1), false);
        assert!(!s.is_active(OffsetDateTime::now_utc()));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let s = session(Duration::ZERO, false);
        assert!(!s.is_active(s.expires_at));
    }
}
