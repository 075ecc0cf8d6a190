use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 100;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Create-time validation policy. Updates skip these checks entirely and
/// trust the caller's values (legacy behavior of this API).
pub fn validate_new_user(email: &str, username: &str, password: &str) -> Result<(), ApiError> {
    if email.is_empty() || !is_valid_email(email) {
        return Err(ApiError::Validation(format!("invalid email: {email}")));
    }
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(ApiError::Validation(format!(
            "username must be {USERNAME_MIN}-{USERNAME_MAX} characters"
        )));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".into()));
    }
    Ok(())
}
