use lazy_static::lazy_static;
use regex::Regex;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password;
use crate::auth::policy::Action;
use crate::auth::repo::{SessionStore, UserStore};
use crate::auth::repo_types::{NewSession, NewUser, Role, Session, User};
use crate::auth::token::TokenKeys;
use crate::error::ApiError;

/// Profile fields collected at signup.
#[derive(Debug, Clone)]
pub struct Signup {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub country: Option<String>,
    pub contact_number: Option<String>,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Signup flow: advisory duplicate pre-checks (username before email), then
/// hash and persist. Always creates a nonadmin; the unique constraints in
/// the store are the real guard against a racing duplicate.
pub async fn signup(users: &dyn UserStore, signup: Signup) -> Result<User, ApiError> {
    if !is_valid_email(&signup.email) {
        return Err(ApiError::InvalidEmail);
    }
    if users.find_by_username(&signup.username).await?.is_some() {
        return Err(ApiError::DuplicateUsername);
    }
    if users.find_by_email(&signup.email).await?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let (salt, digest) = password::hash_password(&signup.password)?;
    let user = users
        .create(NewUser {
            username: signup.username,
            email: signup.email,
            password_hash: digest,
            salt,
            role: Role::Nonadmin,
            first_name: signup.first_name,
            last_name: signup.last_name,
            about_me: signup.about_me,
            dob: signup.dob,
            country: signup.country,
            contact_number: signup.contact_number,
        })
        .await?;
    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Authentication flow: look up by username, recompute the digest with the
/// stored salt, then mint and persist a session valid for the configured
/// window.
pub async fn authenticate(
    users: &dyn UserStore,
    sessions: &dyn SessionStore,
    keys: &TokenKeys,
    username: &str,
    password_plain: &str,
) -> Result<Session, ApiError> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let digest = password::hash_with_salt(password_plain, &user.salt)?;
    if digest != user.password_hash {
        warn!(user_id = %user.id, "signin with wrong password");
        return Err(ApiError::BadCredentials);
    }

    let now = OffsetDateTime::now_utc();
    let expires_at = now + Duration::seconds(keys.session_ttl.as_secs() as i64);
    let token = keys.issue(user.id, now, expires_at)?;
    let session = sessions
        .create(NewSession {
            user_id: user.id,
            access_token: token,
            issued_at: now,
            expires_at,
        })
        .await?;
    info!(user_id = %user.id, session_id = %session.id, "user signed in");
    Ok(session)
}

/// Authorization flow. The resolution order is fixed: a malformed token is
/// rejected before the store is consulted, an unknown token means the user
/// never signed in, and only then is the signed-out-or-expired state
/// checked.
pub async fn authorize(
    sessions: &dyn SessionStore,
    users: &dyn UserStore,
    keys: &TokenKeys,
    token: &str,
    action: Action,
) -> Result<(User, Session), ApiError> {
    keys.decode(token)?;

    let session = sessions
        .find_by_token(token)
        .await?
        .ok_or(ApiError::NotSignedIn)?;

    let now = OffsetDateTime::now_utc();
    if !session.is_active(now) {
        return Err(ApiError::SignedOut(action));
    }

    let user = users.find_by_id(session.user_id).await?.ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "session {} references a missing user",
            session.id
        ))
    })?;
    Ok((user, session))
}

/// Signout flow: compare-and-set the signed-out stamp. Losing the race, or
/// presenting a token that is unknown, already signed out, or expired, all
/// land on NotSignedIn.
pub async fn sign_out(
    sessions: &dyn SessionStore,
    keys: &TokenKeys,
    token: &str,
) -> Result<Uuid, ApiError> {
    keys.decode(token)?;

    let now = OffsetDateTime::now_utc();
    let session = sessions
        .sign_out(token, now)
        .await?
        .ok_or(ApiError::NotSignedIn)?;
    info!(user_id = %session.user_id, session_id = %session.id, "user signed out");
    Ok(session.user_id)
}
