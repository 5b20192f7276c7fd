use serde::Serialize;
use uuid::Uuid;

use crate::auth::repo_types::User;

/// Public profile of a user; credentials and role stay out of it.
#[derive(Debug, Serialize)]
pub struct UserDetailsResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub country: Option<String>,
    pub contact_number: Option<String>,
}

impl From<User> for UserDetailsResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            about_me: user.about_me,
            dob: user.dob,
            country: user.country,
            contact_number: user.contact_number,
        }
    }
}

/// Response returned after an admin deletes a user.
#[derive(Debug, Serialize)]
pub struct UserDeleteResponse {
    pub id: Uuid,
    pub status: &'static str,
}
