use tracing::info;
use uuid::Uuid;

use crate::auth::policy::{self, Action, ResourceKind};
use crate::auth::repo::UserStore;
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::questions::repo::QuestionStore;
use crate::questions::repo_types::{NewQuestion, Question};

/// Any signed-in user may ask.
pub async fn create_question(
    questions: &dyn QuestionStore,
    author: &User,
    content: String,
) -> Result<Question, ApiError> {
    let question = questions
        .create(NewQuestion {
            user_id: author.id,
            content,
        })
        .await?;
    info!(question_id = %question.id, user_id = %author.id, "question created");
    Ok(question)
}

pub async fn all_questions(questions: &dyn QuestionStore) -> Result<Vec<Question>, ApiError> {
    Ok(questions.list_all().await?)
}

/// Questions posted by one user; USR-001 when that user does not exist.
pub async fn questions_for_user(
    questions: &dyn QuestionStore,
    users: &dyn UserStore,
    user_id: Uuid,
) -> Result<Vec<Question>, ApiError> {
    if users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::UserMissing(
            "User with entered uuid whose question details are to be seen does not exist",
        ));
    }
    Ok(questions.list_for_user(user_id).await?)
}

/// Owner-only; admins get no say over someone else's wording.
pub async fn edit_question(
    questions: &dyn QuestionStore,
    editor: &User,
    question_id: Uuid,
    content: String,
) -> Result<Question, ApiError> {
    let question = questions
        .find_by_id(question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound("Entered question uuid does not exist"))?;
    policy::check_ownership(
        ResourceKind::Question,
        question.user_id,
        editor,
        Action::EditQuestion,
    )?;

    let updated = questions
        .update_content(question.id, content)
        .await?
        .ok_or(ApiError::QuestionNotFound("Entered question uuid does not exist"))?;
    info!(question_id = %updated.id, user_id = %editor.id, "question edited");
    Ok(updated)
}

/// Owner or admin.
pub async fn delete_question(
    questions: &dyn QuestionStore,
    requester: &User,
    question_id: Uuid,
) -> Result<Uuid, ApiError> {
    let question = questions
        .find_by_id(question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound("Entered question uuid does not exist"))?;
    policy::check_ownership(
        ResourceKind::Question,
        question.user_id,
        requester,
        Action::DeleteQuestion,
    )?;

    if !questions.delete(question.id).await? {
        return Err(ApiError::QuestionNotFound("Entered question uuid does not exist"));
    }
    info!(question_id = %question.id, user_id = %requester.id, "question deleted");
    Ok(question.id)
}
