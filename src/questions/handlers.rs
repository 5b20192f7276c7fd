use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::BearerToken;
use crate::auth::policy::Action;
use crate::auth::service::authorize;
use crate::auth::token::TokenKeys;
use crate::error::ApiError;
use crate::questions::dto::{
    QuestionEditRequest, QuestionRequest, QuestionResponse, QuestionSummary,
};
use crate::questions::service;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/question/all", get(all_questions))
        .route("/question/all/:user_id", get(questions_by_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/question/create", post(create_question))
        .route("/question/edit/:question_id", put(edit_question))
        .route("/question/delete/:question_id", delete(delete_question))
}

#[instrument(skip(state, token, payload))]
async fn create_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(payload): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (user, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::CreateQuestion,
    )
    .await?;

    let question =
        service::create_question(state.questions.as_ref(), &user, payload.content).await?;
    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse {
            id: question.id,
            status: "QUESTION CREATED",
        }),
    ))
}

#[instrument(skip(state, token))]
async fn all_questions(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Vec<QuestionSummary>>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::ListAllQuestions,
    )
    .await?;

    let questions = service::all_questions(state.questions.as_ref()).await?;
    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, token))]
async fn questions_by_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<QuestionSummary>>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::ListQuestionsForUser,
    )
    .await?;

    let questions =
        service::questions_for_user(state.questions.as_ref(), state.users.as_ref(), user_id)
            .await?;
    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, token, payload))]
async fn edit_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<QuestionEditRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (user, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::EditQuestion,
    )
    .await?;

    let updated =
        service::edit_question(state.questions.as_ref(), &user, question_id, payload.content)
            .await?;
    Ok(Json(QuestionResponse {
        id: updated.id,
        status: "QUESTION EDITED",
    }))
}

#[instrument(skip(state, token))]
async fn delete_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (user, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::DeleteQuestion,
    )
    .await?;

    let deleted = service::delete_question(state.questions.as_ref(), &user, question_id).await?;
    Ok(Json(QuestionResponse {
        id: deleted,
        status: "QUESTION DELETED",
    }))
}
