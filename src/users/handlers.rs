use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::users::repo_types::User;
use crate::users::validate::validate_new_user;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
}

#[instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    match User::find_by_id(&state.db, id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound("user not found")),
    }
}

#[instrument(skip(state, payload))]
async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    validate_new_user(&payload.email, &payload.username, &payload.password)?;

    let email_taken = User::email_exists(&state.db, &payload.email).await?;
    // Skip the second lookup once the first conflict is already known.
    let username_taken =
        !email_taken && User::username_exists(&state.db, &payload.username).await?;
    if let Err(e) = uniqueness_conflict(email_taken, username_taken) {
        warn!(email = %payload.email, username = %payload.username, "duplicate user rejected");
        return Err(e);
    }

    let hash = hash_password(&payload.password)?;

    // The existence checks above race with concurrent creates; the unique
    // constraints on email and username are authoritative.
    let user = match User::insert(
        &state.db,
        &payload.email,
        &payload.username,
        &hash,
        payload.role,
    )
    .await
    {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "create lost uniqueness race");
            return Err(ApiError::Conflict("email or username already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, username = %user.username, "user created");
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let existing = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user not found"))?;

    // Email, username and role overwrite unconditionally; no format or
    // uniqueness re-check happens here (legacy surface, kept as-is).
    let hash = effective_password_hash(existing.password_hash, payload.password.as_deref())?;

    let user = User::update(
        &state.db,
        id,
        &payload.email,
        &payload.username,
        &hash,
        payload.role,
    )
    .await?
    .ok_or(ApiError::NotFound("user not found"))?;

    info!(user_id = user.id, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if User::delete(&state.db, id).await? {
        info!(user_id = id, "user deleted");
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound("user not found"))
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Create rejects a taken email before it ever looks at the username.
fn uniqueness_conflict(email_taken: bool, username_taken: bool) -> Result<(), ApiError> {
    if email_taken {
        return Err(ApiError::Conflict("email already exists".into()));
    }
    if username_taken {
        return Err(ApiError::Conflict("username already exists".into()));
    }
    Ok(())
}

/// Password policy on update: a non-empty supplied value is hashed and
/// replaces the stored hash, an empty or absent one keeps it.
fn effective_password_hash(
    existing: String,
    supplied: Option<&str>,
) -> Result<String, ApiError> {
    match supplied {
        Some(p) if !p.is_empty() => Ok(hash_password(p)?),
        _ => Ok(existing),
    }
}
