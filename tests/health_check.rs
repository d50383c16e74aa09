use actix_web::test;
use chrono::DateTime;

#[macro_use]
mod common;

#[actix_web::test]
async fn test_health_check() {
    let state = common::test_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["environment"], "test");
    assert!(DateTime::parse_from_rfc3339(
        json["timestamp"].as_str().unwrap()
    ).is_ok());
}

#[actix_web::test]
async fn test_unknown_route_returns_json_404() {
    let state = common::test_state();
    let app = init_app!(state);

    let resp = test::TestRequest::get()
        .uri("/api/nothing-here")
        .send_request(&app)
        .await;

    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["message"], "Route not found");
}
