pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod tasks;

use std::sync::Arc;
use actix_web::{web, HttpResponse};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthenticatedUser, TokenService};
pub use tasks::{Task, TaskStore};

/// Maximum accepted JSON body size.
const JSON_LIMIT_BYTES: usize = 64 * 1024;

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.config.environment,
    }))
}

async fn route_not_found() -> Result<HttpResponse> {
    Err(AppError::NotFound("Route not found".into()))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub tokens: Arc<TokenService>,
    pub tasks: Arc<TaskStore>,
}

impl AppState {
    pub fn new(config: Settings) -> Self {
        let tokens = TokenService::from_config(&config.auth);

        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            tasks: Arc::new(TaskStore::new()),
        }
    }
}

/// JSON extractor settings: malformed or mistyped bodies become validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| AppError::validation("body", err.to_string()).into())
}

/// Register every route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::handlers::login))
                    .route("/verify", web::get().to(auth::handlers::verify)),
            )
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(tasks::handlers::list_tasks))
                    .route("", web::post().to(tasks::handlers::create_task))
                    .route("/{id}", web::get().to(tasks::handlers::get_task))
                    .route("/{id}", web::put().to(tasks::handlers::update_task))
                    .route("/{id}", web::delete().to(tasks::handlers::delete_task)),
            ),
    )
    .default_service(web::route().to(route_not_found));
}
