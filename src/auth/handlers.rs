use anyhow::Context;
use axum::extract::{FromRef, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use tracing::instrument;

use crate::auth::dto::{
    SigninRequest, SigninResponse, SignoutResponse, SignupRequest, SignupResponse,
};
use crate::auth::extractors::BearerToken;
use crate::auth::service::{self, Signup};
use crate::auth::token::TokenKeys;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/signin", post(signin))
        .route("/user/signout", post(signout))
}

#[instrument(skip(state, payload))]
async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    let user = service::signup(
        state.users.as_ref(),
        Signup {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            about_me: payload.about_me,
            dob: payload.dob,
            country: payload.country,
            contact_number: payload.contact_number,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            status: "REGISTERED",
        }),
    ))
}

#[instrument(skip(state, payload))]
async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<(HeaderMap, Json<SigninResponse>), ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let session = service::authenticate(
        state.users.as_ref(),
        state.sessions.as_ref(),
        &keys,
        payload.username.trim(),
        &payload.password,
    )
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "access-token",
        session
            .access_token
            .parse()
            .context("token not header-safe")?,
    );

    Ok((
        headers,
        Json(SigninResponse {
            id: session.user_id,
            message: "SIGNED IN SUCCESSFULLY",
            access_token: session.access_token,
        }),
    ))
}

#[instrument(skip(state, token))]
async fn signout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<SignoutResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let user_id = service::sign_out(state.sessions.as_ref(), &keys, &token).await?;

    Ok(Json(SignoutResponse {
        id: user_id,
        message: "SIGNED OUT SUCCESSFULLY",
    }))
}
