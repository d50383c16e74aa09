//! Bearer-token gate for protected routes.
//!
//! Handlers that take an [`AuthenticatedUser`] argument only run once the
//! `Authorization` header has been parsed, size-checked and verified.

use crate::error::{AppError, AuthError};
use crate::AppState;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use tracing::debug;

/// Identity decoded from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::Unauthenticated)?;

    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".into()))?;

    let header = req.headers().get(AUTHORIZATION);
    debug!(
        path = %req.path(),
        header_bytes = header.map(|h| h.len()).unwrap_or(0),
        "Checking bearer token"
    );

    let token = bearer_token(header.and_then(|h| h.to_str().ok())).map_err(|e| {
        debug!(path = %req.path(), "No usable bearer token");
        AppError::AuthError(e)
    })?;

    let claims = state.tokens.verify(token)?;
    debug!(username = %claims.username, "Token accepted");

    Ok(AuthenticatedUser {
        username: claims.username,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
