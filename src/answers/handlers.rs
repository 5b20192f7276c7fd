use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::answers::dto::{
    AnswerEditRequest, AnswerRequest, AnswerResponse, AnswersForQuestionResponse,
};
use crate::answers::service;
use crate::auth::extractors::BearerToken;
use crate::auth::policy::Action;
use crate::auth::service::authorize;
use crate::auth::token::TokenKeys;
use crate::error::ApiError;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/answer/all/:question_id", get(answers_for_question))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/question/:question_id/answer/create", post(create_answer))
        .route("/answer/edit/:answer_id", put(edit_answer))
        .route("/answer/delete/:answer_id", delete(delete_answer))
}

#[instrument(skip(state, token, payload))]
async fn create_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<(StatusCode, Json<AnswerResponse>), ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (user, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::CreateAnswer,
    )
    .await?;

    let answer = service::create_answer(
        state.answers.as_ref(),
        state.questions.as_ref(),
        &user,
        question_id,
        payload.answer,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(AnswerResponse {
            id: answer.id,
            status: "ANSWER CREATED",
        }),
    ))
}

#[instrument(skip(state, token))]
async fn answers_for_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
) -> Result<Json<AnswersForQuestionResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::ListAnswersForQuestion,
    )
    .await?;

    let (question, answers) = service::answers_for_question(
        state.answers.as_ref(),
        state.questions.as_ref(),
        question_id,
    )
    .await?;
    Ok(Json(AnswersForQuestionResponse {
        question_id: question.id,
        question_content: question.content,
        answers: answers.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state, token, payload))]
async fn edit_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(answer_id): Path<Uuid>,
    Json(payload): Json<AnswerEditRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (user, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::EditAnswer,
    )
    .await?;

    let updated =
        service::edit_answer(state.answers.as_ref(), &user, answer_id, payload.content).await?;
    Ok(Json(AnswerResponse {
        id: updated.id,
        status: "ANSWER EDITED",
    }))
}

#[instrument(skip(state, token))]
async fn delete_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(answer_id): Path<Uuid>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let keys = TokenKeys::from_ref(&state);
    let (user, _) = authorize(
        state.sessions.as_ref(),
        state.users.as_ref(),
        &keys,
        &token,
        Action::DeleteAnswer,
    )
    .await?;

    let deleted = service::delete_answer(state.answers.as_ref(), &user, answer_id).await?;
    Ok(Json(AnswerResponse {
        id: deleted,
        status: "ANSWER DELETED",
    }))
}
