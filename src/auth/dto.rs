use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

/// Response returned after signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: Uuid,
    pub status: &'static str,
}

/// Request body for signin.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after signin; the token also travels in the
/// `access-token` response header.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub id: Uuid,
    pub message: &'static str,
    pub access_token: String,
}

/// Response returned after signout.
#[derive(Debug, Serialize)]
pub struct SignoutResponse {
    pub id: Uuid,
    pub message: &'static str,
}
