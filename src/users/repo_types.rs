use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Account role, stored as uppercase text in the `role` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
    Moderator,
}

/// User record in the database.
///
/// `password_hash` only ever holds the argon2 PHC string once a record is
/// stored, and it is serialized into API responses as-is (legacy surface).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> User {
        User {
            id: 7,
            email: "a@x.com".into(),
            username: "alice".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            role: Role::User,
            created_at: datetime!(2024-05-01 12:00 UTC),
            updated_at: datetime!(2024-05-02 12:00 UTC),
        }
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""USER""#);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        assert_eq!(
            serde_json::to_string(&Role::Moderator).unwrap(),
            r#""MODERATOR""#
        );
    }

    #[test]
    fn role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn user_json_includes_every_column() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "USER");
        // The hash rides along in responses; the plaintext never does.
        assert!(json["password_hash"]
            .as_str()
            .unwrap()
            .starts_with("$argon2"));
        assert_eq!(json["created_at"], "2024-05-01T12:00:00Z");
        assert_eq!(json["updated_at"], "2024-05-02T12:00:00Z");
    }
}
