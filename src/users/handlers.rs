use axum::extract::{FromRef, Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::BearerToken;
use crate::auth::policy::Action;
use crate::auth::service::authorize;
use crate::auth::token::TokenKeys;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{UserDeleteResponse, UserDetailsResponse};
use crate::users::service;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/userprofile/:user_id", get(user_profile))
        .route("/admin/user/:user_id", delete(delete_user))
}

#[instrument(skip(state, token))]
async fn user_profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDetailsResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::GetUserDetails,
    )
    .await?;

    let user = service::user_profile(state.users.as_ref(), user_id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, token))]
async fn delete_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDeleteResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (requester, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::DeleteUser,
    )
    .await?;

    let deleted = service::delete_user(state.users.as_ref(), &requester, user_id).await?;
    Ok(Json(UserDeleteResponse {
        id: deleted,
        status: "USER SUCCESSFULLY DELETED",
    }))
}
