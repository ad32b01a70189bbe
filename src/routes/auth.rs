use crate::{
    auth::{AuthResponse, LoginRequest, PasswordHasher, RegisterRequest, TokenService},
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns an authentication token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    hasher: web::Data<PasswordHasher>,
    tokens: web::Data<TokenService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Hash password
    let password_hash = hasher.hash(&register_data.password)?;

    // Insert new user; duplicate email fails with a 400
    let user = store::users::create_user(
        &pool,
        &register_data.name,
        &register_data.email,
        &password_hash,
    )
    .await?;

    // Generate token
    let token = tokens.issue(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}

/// Login user
///
/// Authenticates a user and returns an authentication token. Unknown email
/// and wrong password produce the same 401 body.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    hasher: web::Data<PasswordHasher>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let credentials = store::users::credentials_by_email(&pool, &login_data.email).await?;

    match credentials {
        Some(creds) if hasher.verify(&login_data.password, &creds.password_hash) => {
            let token = tokens.issue(creds.id)?;
            Ok(HttpResponse::Ok().json(AuthResponse {
                token,
                user_id: creds.id,
            }))
        }
        _ => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
