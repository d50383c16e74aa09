use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::{AppError, FieldError};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    fn validate(&self) -> Result<(&str, &str), AppError> {
        let mut errors = Vec::new();

        let username = match self.username.as_deref() {
            Some(u) if !u.is_empty() => Some(u),
            _ => {
                errors.push(FieldError::new("username", "Username is required"));
                None
            }
        };
        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => Some(p),
            _ => {
                errors.push(FieldError::new("password", "Password is required"));
                None
            }
        };

        match (username, password) {
            (Some(u), Some(p)) => Ok((u, p)),
            _ => Err(AppError::ValidationError(errors)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (username, password) = req.validate()?;
    info!("Received login request for user: {}", username);

    match state.tokens.issue(username, password) {
        Ok(token) => {
            info!("Login successful for user: {}", username);
            Ok(HttpResponse::Ok().json(AuthResponse { success: true, token }))
        }
        Err(e) => {
            warn!("Login failed for user: {}: {}", username, e);
            Err(e)
        }
    }
}

/// Report whether the presented token is still good, and for whom.
pub async fn verify(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "user": { "username": user.username }
    }))
}
