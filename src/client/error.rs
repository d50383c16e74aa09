use crate::error::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session rejected by server: {0}")]
    SessionExpired(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Wording suitable for an inline form or alert. Auth failures stay
    /// generic so the message never says which credential was wrong.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::InvalidCredentials => "Invalid username or password".into(),
            ClientError::NotAuthenticated | ClientError::SessionExpired(_) => {
                "Your session has ended. Please log in again.".into()
            }
            ClientError::NotFound(_) => "Task not found".into(),
            ClientError::Validation { message, fields } => fields
                .first()
                .map(|f| f.message.clone())
                .unwrap_or_else(|| message.clone()),
            ClientError::Server { .. } => "Something went wrong. Please try again.".into(),
            ClientError::Transport(_) | ClientError::InvalidUrl(_) => {
                "Unable to reach the server".into()
            }
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidCredentials
                | ClientError::NotAuthenticated
                | ClientError::SessionExpired(_)
        )
    }
}
