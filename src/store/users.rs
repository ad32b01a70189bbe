use crate::error::AppError;
use crate::models::User;
use sqlx::{FromRow, PgPool};

/// The id and password hash for a stored account, fetched for login checks.
/// Never serialized; the hash stays inside the store/route boundary.
#[derive(Debug, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub password_hash: String,
}

/// Canonical form for stored emails: trimmed and lowercased, so uniqueness
/// and lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Inserts a new user. Fails with a 400 if the (normalized) email is already
/// taken: the pre-check catches the common case, and the unique index on
/// `email` closes the race (its violation also maps to a 400).
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email);

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(name.trim())
    .bind(&email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Looks up the stored credentials for a login attempt by normalized email.
pub async fn credentials_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserCredentials>, AppError> {
    let creds = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, password_hash FROM users WHERE email = $1",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    Ok(creds)
}
