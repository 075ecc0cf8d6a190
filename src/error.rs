use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Everything a request can fail with, mapped straight onto a status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Authentication(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Conflicts surface as 400 on this API, not 409.
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                json!({ "error": "internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        let mut res = (status, Json(body)).into_response();
        if matches!(self, ApiError::Authentication(_)) {
            res.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="userhub""#),
            );
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_conflict_are_bad_request() {
        assert_eq!(
            ApiError::Validation("bad email".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("email already exists".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_and_authentication_statuses() {
        assert_eq!(
            ApiError::NotFound("user not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Authentication("credentials required").status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn authentication_response_carries_challenge_header() {
        let res = ApiError::Authentication("credentials required").into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let challenge = res
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .expect("WWW-Authenticate set");
        assert!(challenge.to_str().unwrap().starts_with("Basic"));
    }

    #[test]
    fn internal_response_hides_details() {
        let res = ApiError::Internal(anyhow::anyhow!("pool timed out")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
