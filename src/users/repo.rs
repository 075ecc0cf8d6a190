use sqlx::PgPool;

use crate::users::repo_types::{Role, User};

impl User {
    /// All users, oldest id first. No pagination.
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn email_exists(db: &PgPool, email: &str) -> sqlx::Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    pub async fn username_exists(db: &PgPool, username: &str) -> sqlx::Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    /// Insert a new user. The database assigns id, created_at and updated_at.
    pub async fn insert(
        db: &PgPool,
        email: &str,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, username, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
    }

    /// Overwrite a user's mutable columns, refreshing updated_at. `None` when
    /// no row has that id.
    pub async fn update(
        db: &PgPool,
        id: i64,
        email: &str,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, username = $3, password_hash = $4, role = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, username, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_optional(db)
        .await
    }

    /// Hard delete. `true` when a row actually went away.
    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
