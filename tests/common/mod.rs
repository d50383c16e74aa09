#![allow(dead_code)]

use chrono::Duration;
use taskdeck_server::auth::{Credentials, TokenService};
use taskdeck_server::{AppState, Settings};

pub const TEST_SECRET: &str = "test_secret";

pub fn test_settings() -> Settings {
    Settings::new_for_test().expect("Failed to load test config")
}

pub fn test_state() -> AppState {
    AppState::new(test_settings())
}

/// Mint a valid token for any username, signed with the test secret.
pub fn token_for(username: &str) -> String {
    TokenService::new(
        Some(TEST_SECRET.to_string()),
        Duration::hours(1),
        Credentials {
            username: username.to_string(),
            password: "pw".to_string(),
        },
    )
    .issue(username, "pw")
    .expect("Failed to issue test token")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Build the full application around `$state` for `actix_web::test`.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(taskdeck_server::configure),
        )
        .await
    };
}
