use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret. Login fails with a 500 while this is unset.
    pub jwt_secret: Option<String>,
    pub token_expiry_secs: i64,
    /// The single mock account accepted by the login endpoint.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
    environment: &str,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("environment", environment)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("server.workers", num_cpus::get() as i64)?
        .set_default("auth.token_expiry_secs", 3600)?
        .set_default("auth.username", "admin")?
        .set_default("auth.password", "changeme")?
        .set_default("cors.allowed_origin", "http://localhost:3000")?
        .set_default("cors.max_age", 3600)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = with_defaults(Config::builder(), "development")?
            // Add in settings from the config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // E.g., `APP_AUTH__JWT_SECRET=...` sets `Settings.auth.jwt_secret`.
            // Values stay strings so credentials like "007" survive intact.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?;

        Self::from_config(s)
    }

    /// Deterministic settings for tests: no config files, no environment.
    pub fn new_for_test() -> Result<Self, ConfigError> {
        with_defaults(Config::builder(), "test")?
            .set_override("auth.jwt_secret", "test_secret")?
            .set_override("server.workers", 1)?
            .build()
            .and_then(Self::from_config)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        if settings.server.workers == 0 {
            return Err(ConfigError::Message("server.workers must be at least 1".into()));
        }
        Ok(settings)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
