use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Absolute expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed bearer tokens.
///
/// The signing secret, token lifetime, and clock-skew leeway are injected at
/// construction from `Config`. The same keys are used for the life of the
/// process, so any token issued here verifies here.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_hours: i64,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
            validation,
        }
    }

    /// Issues a token for the given user id, expiring `ttl_hours` from now.
    ///
    /// The expiry is stored as an absolute instant, so verification gives the
    /// same answer no matter when it runs (modulo the passage of time itself).
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::hours(self.ttl_hours))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// Every failure mode (malformed token, bad signature, expired) collapses
    /// into the same `AppError::Unauthorized` via the `From` impl, so the
    /// response gives no hint of which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
