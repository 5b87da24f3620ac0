use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::UserRole;

/// Extracts the verified identity from request extensions.
///
/// Intended for routes behind `AuthMiddleware`, which validates the bearer
/// token and inserts the decoded claims. If no claims are present the
/// extractor rejects with `Unauthorized` rather than letting the handler run
/// without an identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                let err = AppError::Unauthorized(
                    "Identity not found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

/// Declarative per-route role guard: extracts the identity and additionally
/// requires the ADMIN role, rejecting with `Forbidden` otherwise. Routes that
/// take [`AuthenticatedUser`] instead accept any valid token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) if claims.role == UserRole::Admin => ready(Ok(AdminUser(claims))),
            Some(_) => {
                let err = AppError::Forbidden("User does not have required role".to_string());
                ready(Err(err.into()))
            }
            None => {
                let err = AppError::Unauthorized(
                    "Identity not found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
