use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The authenticated caller's identity, extracted from request extensions.
///
/// `AuthMiddleware` validates the bearer token and inserts this value; taking
/// it as a handler argument is what makes a route require authentication.
/// Handlers must use this and only this for ownership decisions — never a
/// user id supplied in a request body.
///
/// If the value is missing (middleware not applied to the route), the
/// extractor rejects with a 401 rather than letting the request through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            None => {
                // Only reachable if a route takes this extractor without
                // being wrapped in AuthMiddleware. Unauthorized is the safe
                // default.
                let err = AppError::Unauthorized("Invalid or missing token".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
