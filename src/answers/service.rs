use tracing::info;
use uuid::Uuid;

use crate::answers::repo::AnswerStore;
use crate::answers::repo_types::{Answer, NewAnswer};
use crate::auth::policy::{self, Action, ResourceKind};
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::questions::repo::QuestionStore;
use crate::questions::repo_types::Question;

/// The question must exist before anything can be posted under it.
pub async fn create_answer(
    answers: &dyn AnswerStore,
    questions: &dyn QuestionStore,
    author: &User,
    question_id: Uuid,
    content: String,
) -> Result<Answer, ApiError> {
    let question = questions
        .find_by_id(question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound("The question entered is invalid"))?;

    let answer = answers
        .create(NewAnswer {
            user_id: author.id,
            question_id: question.id,
            content,
        })
        .await?;
    info!(answer_id = %answer.id, question_id = %question.id, user_id = %author.id, "answer created");
    Ok(answer)
}

/// All answers under a question, newest first; an unanswered question
/// yields an empty list, not an error.
pub async fn answers_for_question(
    answers: &dyn AnswerStore,
    questions: &dyn QuestionStore,
    question_id: Uuid,
) -> Result<(Question, Vec<Answer>), ApiError> {
    let question = questions.find_by_id(question_id).await?.ok_or(
        ApiError::QuestionNotFound(
            "The question with entered uuid whose details are to be seen does not exist",
        ),
    )?;
    let list = answers.list_for_question(question.id).await?;
    Ok((question, list))
}

/// Owner-only.
pub async fn edit_answer(
    answers: &dyn AnswerStore,
    editor: &User,
    answer_id: Uuid,
    content: String,
) -> Result<Answer, ApiError> {
    let answer = answers
        .find_by_id(answer_id)
        .await?
        .ok_or(ApiError::AnswerNotFound)?;
    policy::check_ownership(ResourceKind::Answer, answer.user_id, editor, Action::EditAnswer)?;

    let updated = answers
        .update_content(answer.id, content)
        .await?
        .ok_or(ApiError::AnswerNotFound)?;
    info!(answer_id = %updated.id, user_id = %editor.id, "answer edited");
    Ok(updated)
}

/// Owner or admin.
pub async fn delete_answer(
    answers: &dyn AnswerStore,
    requester: &User,
    answer_id: Uuid,
) -> Result<Uuid, ApiError> {
    let answer = answers
        .find_by_id(answer_id)
        .await?
        .ok_or(ApiError::AnswerNotFound)?;
    policy::check_ownership(
        ResourceKind::Answer,
        answer.user_id,
        requester,
        Action::DeleteAnswer,
    )?;

    if !answers.delete(answer.id).await? {
        return Err(ApiError::AnswerNotFound);
    }
    info!(answer_id = %answer.id, user_id = %requester.id, "answer deleted");
    Ok(answer.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::Role;
    use crate::auth::service::{signup, Signup};
    use crate::questions::service::create_question;
    use crate::state::AppState;

    async fn registered_user(state: &AppState, username: &str) -> User {
        signup(
            state.users.as_ref(),
            Signup {
                username: username.into(),
                email: format!("{username}@example.com"),
                password: "Secur3P@ssw0rd!".into(),
                first_name: None,
                last_name: None,
                about_me: None,
                dob: None,
                country: None,
                contact_number: None,
            },
        )
        .await
        .expect("signup")
    }

    #[tokio::test]
    async fn answering_an_existing_question() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let bob = registered_user(&state, "bob").await;
        let question = create_question(state.questions.as_ref(), &alice, "Why?".into())
            .await
            .unwrap();

        let answer = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &bob,
            question.id,
            "Because.".into(),
        )
        .await
        .expect("answer");
        assert_eq!(answer.question_id, question.id);
        assert_eq!(answer.user_id, bob.id);
    }

    #[tokio::test]
    async fn answering_a_missing_question_is_ques_001() {
        let state = AppState::fake();
        let bob = registered_user(&state, "bob").await;

        let err = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &bob,
            Uuid::new_v4(),
            "Into the void".into(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::QuestionNotFound(_)));
        assert_eq!(err.code(), "QUES-001");
        assert_eq!(err.to_string(), "The question entered is invalid");
    }

    #[tokio::test]
    async fn unanswered_question_lists_empty() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let question = create_question(state.questions.as_ref(), &alice, "Quiet one".into())
            .await
            .unwrap();

        let (got, list) = answers_for_question(
            state.answers.as_ref(),
            state.questions.as_ref(),
            question.id,
        )
        .await
        .expect("list");
        assert_eq!(got.id, question.id);
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn listing_answers_of_a_missing_question_is_ques_001() {
        let state = AppState::fake();
        let err = answers_for_question(
            state.answers.as_ref(),
            state.questions.as_ref(),
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::QuestionNotFound(_)));
    }

    #[tokio::test]
    async fn owner_edits_their_answer() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let question = create_question(state.questions.as_ref(), &alice, "Why?".into())
            .await
            .unwrap();
        let answer = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &alice,
            question.id,
            "Draft".into(),
        )
        .await
        .unwrap();

        let updated = edit_answer(state.answers.as_ref(), &alice, answer.id, "Polished".into())
            .await
            .expect("edit");
        assert_eq!(updated.content, "Polished");
    }

    #[tokio::test]
    async fn non_owner_cannot_edit_an_answer() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let bob = registered_user(&state, "bob").await;
        let question = create_question(state.questions.as_ref(), &alice, "Why?".into())
            .await
            .unwrap();
        let answer = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &alice,
            question.id,
            "Hers".into(),
        )
        .await
        .unwrap();

        let err = edit_answer(state.answers.as_ref(), &bob, answer.id, "His".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotOwner(ResourceKind::Answer)));
    }

    #[tokio::test]
    async fn editing_a_missing_answer_is_ans_001() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let err = edit_answer(state.answers.as_ref(), &alice, Uuid::new_v4(), "x".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AnswerNotFound));
        assert_eq!(err.code(), "ANS-001");
    }

    #[tokio::test]
    async fn admin_deletes_someone_elses_answer() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let mut admin = registered_user(&state, "root").await;
        admin.role = Role::Admin;

        let question = create_question(state.questions.as_ref(), &alice, "Why?".into())
            .await
            .unwrap();
        let answer = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &alice,
            question.id,
            "Hers".into(),
        )
        .await
        .unwrap();

        delete_answer(state.answers.as_ref(), &admin, answer.id)
            .await
            .expect("admin override applies to delete");
        assert!(state
            .answers
            .find_by_id(answer.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn non_owner_cannot_delete_an_answer() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let bob = registered_user(&state, "bob").await;
        let question = create_question(state.questions.as_ref(), &alice, "Why?".into())
            .await
            .unwrap();
        let answer = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &alice,
            question.id,
            "Hers".into(),
        )
        .await
        .unwrap();

        let err = delete_answer(state.answers.as_ref(), &bob, answer.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotOwnerOrAdmin(ResourceKind::Answer)));
    }

    #[tokio::test]
    async fn deleting_a_question_drops_its_answers() {
        let state = AppState::fake();
        let alice = registered_user(&state, "alice").await;
        let question = create_question(state.questions.as_ref(), &alice, "Why?".into())
            .await
            .unwrap();
        let answer = create_answer(
            state.answers.as_ref(),
            state.questions.as_ref(),
            &alice,
            question.id,
            "Because".into(),
        )
        .await
        .unwrap();

        crate::questions::service::delete_question(state.questions.as_ref(), &alice, question.id)
            .await
            .unwrap();
        assert!(state
            .answers
            .find_by_id(answer.id)
            .await
            .unwrap()
            .is_none());
    }
}
