use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// The auth gate. Wrapped around the `/api` scope; every request passing
/// through must carry a valid bearer token, except the register/login
/// endpoints which exist to hand tokens out.
///
/// Per request the flow is: extract the `Authorization: Bearer <token>`
/// header, verify it against the `TokenService` held in app data, and insert
/// the resolved `AuthenticatedUser` into request extensions for downstream
/// extractors. Any failure along the way rejects with the same 401, so a
/// client cannot tell a missing token from a bad or expired one.
///
/// The verified claim is trusted as-is; no second round-trip to the users
/// table is made to confirm the id still exists.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Registration and login are the only unauthenticated endpoints
        // inside this scope.
        let path = req.path();
        if path.starts_with("/api/auth/login") || path.starts_with("/api/auth/register") {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token_service = match req.app_data::<web::Data<TokenService>>() {
            Some(service) => service.clone(),
            None => {
                let err = AppError::InternalServerError("Token service not configured".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        let bearer_token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer_token {
            Some(token) => match token_service.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthenticatedUser(claims.sub));
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
            },
            // Same body as a failed verification: no oracle for the client.
            None => {
                let app_err = AppError::Unauthorized("Invalid or missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
