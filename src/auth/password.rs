use crate::error::AppError;
use bcrypt::{hash, verify};

/// Salted one-way password hashing with a configurable bcrypt cost factor.
///
/// The cost comes from `Config` at startup rather than a constant, so tests
/// can run with a cheap cost while production keeps the default of 12.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password. bcrypt generates a fresh random salt per
    /// call and embeds it in the returned string, so no salt is stored
    /// separately.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    /// Checks a candidate password against a stored hash.
    ///
    /// A malformed stored hash yields `false` rather than an error: from the
    /// caller's point of view it is simply a credential that does not match.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        verify(password, hashed_password).unwrap_or(false)
    }
}
