use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::config::TokenConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Signed token payload: subject plus validity window and environment
/// binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // user ID
    pub jti: Uuid,   // token ID, fresh per issuance
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Holds signing and verification keys with config data.
#[derive(Clone)]
pub struct TokenKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub session_ttl: Duration,
}

impl TokenKeys {
    pub fn from_config(config: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            session_ttl: Duration::from_secs(config.session_ttl_hours.max(0) as u64 * 60 * 60),
        }
    }

    /// Sign a token binding `user_id` to the given validity window. The
    /// `jti` keeps tokens distinct even when one user signs in twice within
    /// the same second, so the stored-token uniqueness holds.
    pub fn issue(
        &self,
        user_id: Uuid,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            iat: issued_at.unix_timestamp() as usize,
            exp: expires_at.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify signature, issuer and audience. Expiry is NOT checked here:
    /// the session record is the authority on liveness, so a stale but
    /// genuine token must reach the store lookup instead of being rejected
    /// as malformed.
    pub fn decode(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "access token rejected");
            ApiError::TokenInvalid
        })?;
        Ok(data.claims)
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.token)
    }
}
