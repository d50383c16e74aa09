use actix_web::{web, App, HttpServer};
use serde_json::json;
use std::net::TcpListener;
use taskdeck_server::client::{ApiClient, ClientError, TaskUpdate};
use taskdeck_server::configure;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn task_json(id: u64, title: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "completed": completed,
        "userId": "admin",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_login_stores_token_and_attaches_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "admin", "password": "changeme" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "token": "tok-123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [task_json(1, "A", false)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    client.login("admin", "changeme").await.unwrap();
    assert_eq!(client.token().as_deref(), Some("tok-123"));

    let tasks = client.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "A");
    assert_eq!(tasks[0].user_id, "admin");
}

#[tokio::test]
async fn test_bad_login_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": { "message": "Invalid credentials" }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.login("admin", "wrong").await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidCredentials));
    assert_eq!(err.user_message(), "Invalid username or password");
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_task_calls_require_login() {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri()).unwrap();

    assert!(matches!(client.list_tasks().await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(client.delete_task(1).await, Err(ClientError::NotAuthenticated)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_session_clears_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": { "message": "Invalid token" }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap().with_token("stale");
    let err = client.list_tasks().await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired(ref m) if m == "Invalid token"));
    assert!(err.is_auth_failure());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_error_statuses_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "message": "Task not found" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": {
                "message": "Validation failed",
                "validationErrors": [{ "field": "title", "message": "Title is required" }]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap().with_token("tok");

    let err = client.get_task(7).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref m) if m == "Task not found"));

    match client.create_task("", None).await.unwrap_err() {
        ClientError::Validation { fields, .. } => {
            assert_eq!(fields[0].field, "title");
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let err = client.delete_task(7).await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, .. }));

    // Non-auth failures keep the session.
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/3"))
        .and(body_json(json!({ "completed": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": task_json(3, "A", true)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap().with_token("tok");
    let update = TaskUpdate { completed: Some(true), ..Default::default() };
    let task = client.update_task(3, &update).await.unwrap();
    assert!(task.completed);
}

#[actix_web::test]
async fn test_client_against_running_server() {
    let state = common::test_state();
    let data = web::Data::new(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .listen(listener)
        .unwrap()
        .workers(1)
        .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let client = ApiClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();

    let err = client.login("admin", "nope").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials));

    client.login("admin", "changeme").await.unwrap();
    assert_eq!(client.verify_session().await.unwrap(), "admin");
    assert!(client.list_tasks().await.unwrap().is_empty());

    let task = client.create_task("A", Some("B")).await.unwrap();
    assert_eq!(task.description, "B");
    assert!(!task.completed);

    let update = TaskUpdate { completed: Some(true), ..Default::default() };
    let updated = client.update_task(task.id, &update).await.unwrap();
    assert!(updated.completed);
    assert_eq!(client.get_task(task.id).await.unwrap(), updated);

    client.delete_task(task.id).await.unwrap();
    assert!(matches!(client.get_task(task.id).await, Err(ClientError::NotFound(_))));
    assert!(matches!(client.delete_task(task.id).await, Err(ClientError::NotFound(_))));

    client.logout();
    assert!(matches!(client.list_tasks().await, Err(ClientError::NotAuthenticated)));

    handle.stop(true).await;
}
