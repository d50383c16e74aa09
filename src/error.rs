use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether error envelopes carry a `stack` field. Off unless startup turns it on.
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug details in error responses.
/// `main` turns this on for every environment except production.
pub fn set_expose_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    AuthError(#[from] AuthError),

    #[error("Validation failed")]
    ValidationError(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("Server misconfigured: {0}")]
    ServerMisconfigured(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationError(vec![FieldError::new(field, message)])
    }

    /// Render the JSON envelope, with or without the debug `stack` field.
    pub fn envelope(&self, include_stack: bool) -> Value {
        let mut error = json!({ "message": self.to_string() });

        if let AppError::ValidationError(fields) = self {
            error["validationErrors"] = json!(fields);
        }
        if include_stack {
            error["stack"] = json!(format!("{:?}", self));
        }

        json!({
            "success": false,
            "error": error
        })
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = self.envelope(EXPOSE_DETAILS.load(Ordering::Relaxed));
        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::TokenTooLarge => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            },
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServerMisconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied. No token provided.")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token too large")]
    TokenTooLarge,
}
