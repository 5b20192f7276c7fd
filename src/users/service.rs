use tracing::info;
use uuid::Uuid;

use crate::auth::policy;
use crate::auth::repo::UserStore;
use crate::auth::repo_types::User;
use crate::error::ApiError;

/// Profile lookup; USR-001 when the target does not exist.
pub async fn user_profile(users: &dyn UserStore, user_id: Uuid) -> Result<User, ApiError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::UserMissing("User with entered uuid does not exist"))
}

/// Admin-only deletion. The role gate runs before the target lookup, so a
/// non-admin gets ATHR-005 even for a uuid that matches nothing.
pub async fn delete_user(
    users: &dyn UserStore,
    requester: &User,
    target_id: Uuid,
) -> Result<Uuid, ApiError> {
    policy::require_admin(requester)?;

    let target = users.find_by_id(target_id).await?.ok_or(ApiError::UserMissing(
        "User with the entered Uuid to be deleted does not exist",
    ))?;

    // the row can vanish between the lookup and the delete
    if !users.delete(target.id).await? {
        return Err(ApiError::UserMissing(
            "User with the entered Uuid to be deleted does not exist",
        ));
    }
    info!(target_id = %target.id, admin_id = %requester.id, "user deleted");
    Ok(target.id)
}
