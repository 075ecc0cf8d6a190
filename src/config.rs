use serde::Deserialize;

/// Access-gate options. Requests whose path starts with one of
/// `public_prefixes` skip authentication entirely; everything else must
/// present HTTP Basic credentials matching `basic_username` and the argon2
/// hash in `basic_password_hash`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub public_prefixes: Vec<String>,
    pub cross_site_protection: bool,
    pub basic_username: String,
    pub basic_password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let auth = AuthConfig {
            // The whole user-resource family is public by default.
            public_prefixes: parse_prefixes(
                &std::env::var("PUBLIC_PREFIXES").unwrap_or_else(|_| "/api/users".into()),
            ),
            cross_site_protection: std::env::var("CROSS_SITE_PROTECTION")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            basic_username: std::env::var("AUTH_USERNAME").unwrap_or_else(|_| "admin".into()),
            // Empty hash means every credential pair is rejected.
            basic_password_hash: std::env::var("AUTH_PASSWORD_HASH").unwrap_or_default(),
        };
        Ok(Self { database_url, auth })
    }
}

fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
