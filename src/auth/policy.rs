use uuid::Uuid;

use crate::auth::repo_types::{Role, User};
use crate::error::ApiError;

/// Operations a bearer token can be presented for. Carried through the
/// authorization flow so rejection messages can name what was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateQuestion,
    ListAllQuestions,
    ListQuestionsForUser,
    EditQuestion,
    DeleteQuestion,
    CreateAnswer,
    EditAnswer,
    DeleteAnswer,
    ListAnswersForQuestion,
    GetUserDetails,
    DeleteUser,
}

impl Action {
    /// Completes the "Sign in first to ..." rejection message.
    pub fn phrase(&self) -> &'static str {
        match self {
            Action::CreateQuestion => "post a question",
            Action::ListAllQuestions => "get all questions",
            Action::ListQuestionsForUser => "get all questions posted by a specific user",
            Action::EditQuestion => "edit the question",
            Action::DeleteQuestion => "delete a question",
            Action::CreateAnswer => "post an answer",
            Action::EditAnswer => "edit an answer",
            Action::DeleteAnswer => "delete an answer",
            Action::ListAnswersForQuestion => "get the answers",
            Action::GetUserDetails => "get user details",
            Action::DeleteUser => "delete a user",
        }
    }

    /// Delete-class actions are the only ones with an admin override.
    fn is_delete(self) -> bool {
        matches!(self, Action::DeleteQuestion | Action::DeleteAnswer)
    }
}

/// The content kinds ownership applies to; used to phrase ATHR rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Question,
    Answer,
}

impl ResourceKind {
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Question => "question",
            ResourceKind::Answer => "answer",
        }
    }
}

/// Ownership gate for editing and deleting content. The owner check runs
/// first, so an owner passes regardless of role; the admin override applies
/// only to delete-class actions.
pub fn check_ownership(
    kind: ResourceKind,
    owner_id: Uuid,
    requester: &User,
    action: Action,
) -> Result<(), ApiError> {
    if requester.id == owner_id {
        return Ok(());
    }
    if action.is_delete() {
        if requester.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::NotOwnerOrAdmin(kind))
        }
    } else {
        Err(ApiError::NotOwner(kind))
    }
}

/// Admin-only gate for user deletion. Runs before the target lookup, so the
/// role failure wins even when the target does not exist.
pub fn require_admin(requester: &User) -> Result<(), ApiError> {
    if requester.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::NotAdmin)
    }
}
