use crate::config::AuthConfig;
use crate::error::{AppError, AuthError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tokens longer than this are rejected before any decoding is attempted.
pub const MAX_TOKEN_BYTES: usize = 8192;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// The single account the server accepts.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Issues and verifies stateless HS256 session tokens.
pub struct TokenService {
    jwt_secret: Option<String>,
    expiry: Duration,
    credentials: Credentials,
}

impl TokenService {
    pub fn new(jwt_secret: Option<String>, expiry: Duration, credentials: Credentials) -> Self {
        Self {
            jwt_secret,
            expiry,
            credentials,
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(
            auth.jwt_secret.clone(),
            Duration::seconds(auth.token_expiry_secs),
            Credentials {
                username: auth.username.clone(),
                password: auth.password.clone(),
            },
        )
    }

    pub fn has_secret(&self) -> bool {
        self.secret().is_ok()
    }

    /// Check the credential pair and mint a token for it.
    ///
    /// Comparison is exact: no trimming, no case folding.
    pub fn issue(&self, username: &str, password: &str) -> Result<String, AppError> {
        if username != self.credentials.username || password != self.credentials.password {
            return Err(AuthError::InvalidCredentials.into());
        }

        let now = Utc::now();
        self.sign(&Claims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        })
    }

    /// Verify signature and expiry, then trust the payload as the caller's identity.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        if token.len() > MAX_TOKEN_BYTES {
            warn!(token_bytes = token.len(), "Rejected oversized token");
            return Err(AuthError::TokenTooLarge.into());
        }

        let secret = self.secret()?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => debug!("Token expired"),
                kind => debug!("Token rejected: {:?}", kind),
            }
            AppError::AuthError(AuthError::InvalidToken)
        })?;

        Ok(data.claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        let secret = self.secret()?;
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    fn secret(&self) -> Result<&str, AppError> {
        match self.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(AppError::ServerMisconfigured("JWT secret is not configured".into())),
        }
    }
}
