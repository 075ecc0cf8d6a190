use serde::Deserialize;

use crate::users::repo_types::Role;

/// Body for `POST /users`. The password arrives in plaintext and is hashed
/// before anything is persisted.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Body for `PUT /users/:id`. Email, username and role overwrite the stored
/// values unconditionally; the password only when supplied non-empty.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub password: Option<String>,
}
