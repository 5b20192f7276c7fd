use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::policy::{Action, ResourceKind};

/// Every way a request can fail, with a stable machine-readable code and a
/// human-readable message. Handlers return this directly; the `IntoResponse`
/// impl renders the JSON body and picks the status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Try any other Username, this Username has already been taken")]
    DuplicateUsername,

    #[error("This user has already been registered, try with any other emailId")]
    DuplicateEmail,

    #[error("Not a valid email address")]
    InvalidEmail,

    #[error("This username does not exist")]
    UserNotFound,

    #[error("Password failed")]
    BadCredentials,

    #[error("Access token is malformed or its signature does not verify")]
    TokenInvalid,

    #[error("User has not signed in")]
    NotSignedIn,

    #[error("User is signed out. Sign in first to {}", .0.phrase())]
    SignedOut(Action),

    #[error("Only the {} owner can edit the {}", .0.noun(), .0.noun())]
    NotOwner(ResourceKind),

    #[error("Only the {} owner or admin can delete the {}", .0.noun(), .0.noun())]
    NotOwnerOrAdmin(ResourceKind),

    #[error("Unauthorized Access, Entered user is not an admin")]
    NotAdmin,

    #[error("{0}")]
    UserMissing(&'static str),

    #[error("{0}")]
    QuestionNotFound(&'static str),

    #[error("Entered answer uuid does not exist")]
    AnswerNotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Stable code; clients branch on this, never on the message text.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DuplicateUsername => "SGR-001",
            ApiError::DuplicateEmail => "SGR-002",
            ApiError::InvalidEmail => "SGR-003",
            ApiError::UserNotFound => "ATH-001",
            ApiError::BadCredentials => "ATH-002",
            ApiError::TokenInvalid => "ATH-003",
            ApiError::NotSignedIn => "ATHR-001",
            ApiError::SignedOut(_) => "ATHR-002",
            ApiError::NotOwner(_) => "ATHR-003",
            ApiError::NotOwnerOrAdmin(_) => "ATHR-004",
            ApiError::NotAdmin => "ATHR-005",
            ApiError::UserMissing(_) => "USR-001",
            ApiError::QuestionNotFound(_) => "QUES-001",
            ApiError::AnswerNotFound => "ANS-001",
            ApiError::Internal(_) => "SRV-001",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateUsername | ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::InvalidEmail => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound | ApiError::BadCredentials | ApiError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotSignedIn
            | ApiError::SignedOut(_)
            | ApiError::NotOwner(_)
            | ApiError::NotOwnerOrAdmin(_)
            | ApiError::NotAdmin => StatusCode::FORBIDDEN,
            ApiError::UserMissing(_) | ApiError::QuestionNotFound(_) | ApiError::AnswerNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            // Debug formatting keeps the anyhow source chain in the log
            // while the response body stays generic.
            error!(code = self.code(), detail = ?self, "request failed");
        } else {
            warn!(code = self.code(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_conflicts_are_409() {
        assert_eq!(ApiError::DuplicateUsername.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::DuplicateUsername.code(), "SGR-001");
        assert_eq!(ApiError::DuplicateEmail.code(), "SGR-002");
    }

    #[test]
    fn credential_failures_are_401() {
        for err in [
            ApiError::UserNotFound,
            ApiError::BadCredentials,
            ApiError::TokenInvalid,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn session_and_permission_failures_are_403() {
        assert_eq!(ApiError::NotSignedIn.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::SignedOut(Action::DeleteUser).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::NotAdmin.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn signed_out_message_names_the_action() {
        let err = ApiError::SignedOut(Action::CreateQuestion);
        assert_eq!(err.code(), "ATHR-002");
        assert_eq!(
            err.to_string(),
            "User is signed out. Sign in first to post a question"
        );
    }

    #[test]
    fn internal_message_does_not_leak_the_source() {
        let err = ApiError::Internal(anyhow::anyhow!("pool timed out"));
        assert_eq!(err.code(), "SRV-001");
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
