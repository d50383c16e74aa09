//! Typed HTTP client for the task API.
//!
//! Holds the session token after login and attaches it to every task call,
//! the same job the browser's auth and task contexts do.

mod error;

pub use error::ClientError;

use crate::error::FieldError;
use crate::tasks::{Task, TaskId};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: VerifiedUser,
}

#[derive(Debug, Deserialize)]
struct VerifiedUser {
    username: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "validationErrors")]
    validation_errors: Vec<FieldError>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Partial update sent with `update_task`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: RwLock::new(None),
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, "api/auth/login")?
            .json(&LoginBody { username, password })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Login rejected for {}", username);
            self.set_token(None);
            return Err(ClientError::InvalidCredentials);
        }

        let body: LoginResponse = self.decode(response).await?;
        self.set_token(Some(body.token));
        debug!("Logged in as {}", username);
        Ok(())
    }

    /// Forget the session token. Tokens are stateless, so nothing is sent.
    pub fn logout(&self) {
        self.set_token(None);
    }

    /// Ask the server who the stored token belongs to.
    pub async fn verify_session(&self) -> Result<String, ClientError> {
        let response = self.authorized(Method::GET, "api/auth/verify")?.send().await?;
        let body: VerifyResponse = self.decode(response).await?;
        Ok(body.user.username)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.authorized(Method::GET, "api/tasks")?.send().await?;
        let body: DataResponse<Vec<Task>> = self.decode(response).await?;
        Ok(body.data)
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Task, ClientError> {
        let path = format!("api/tasks/{}", id);
        let response = self.authorized(Method::GET, &path)?.send().await?;
        let body: DataResponse<Task> = self.decode(response).await?;
        Ok(body.data)
    }

    pub async fn create_task(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Task, ClientError> {
        let response = self
            .authorized(Method::POST, "api/tasks")?
            .json(&CreateBody { title, description })
            .send()
            .await?;
        let body: DataResponse<Task> = self.decode(response).await?;
        Ok(body.data)
    }

    pub async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, ClientError> {
        let path = format!("api/tasks/{}", id);
        let response = self
            .authorized(Method::PUT, &path)?
            .json(update)
            .send()
            .await?;
        let body: DataResponse<Task> = self.decode(response).await?;
        Ok(body.data)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let path = format!("api/tasks/{}", id);
        let response = self.authorized(Method::DELETE, &path)?.send().await?;
        let _: serde_json::Value = self.decode(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        Ok(self.http.request(method, url))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path)?.bearer_auth(token))
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
        let message = envelope.error.message;
        debug!("API call failed with {}: {}", status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE => {
                // The stored token is no longer usable.
                self.set_token(None);
                ClientError::SessionExpired(message)
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation {
                message,
                fields: envelope.error.validation_errors,
            },
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }
}
