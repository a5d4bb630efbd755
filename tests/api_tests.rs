use std::sync::Arc;
use std::time::Duration;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, http::StatusCode, test, web, App};
use serde_json::{json, Value};
use tempfile::TempDir;

use inboxprism::auth::SessionGate;
use inboxprism::routes::{self, app_state::AppState};
use inboxprism::services::email_service::UpstreamClient;
use inboxprism::session_manager::ChatSessionManager;

// Nothing listens here; the chat endpoint must degrade to an empty inbox and
// the pass-through endpoints must surface a gateway error.
const DEAD_UPSTREAM: &str = "http://127.0.0.1:9";

fn test_state(dir: &TempDir) -> AppState {
    AppState {
        session_manager: ChatSessionManager::new(),
        gate: Arc::new(SessionGate::new(
            "12345".to_string(),
            dir.path().join("auth_state.json"),
        )),
        emails: UpstreamClient::new(DEAD_UPSTREAM.to_string(), Duration::from_secs(30)),
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new($state.clone()))
                .configure(routes::session_routes::init_routes)
                .configure(routes::chat_routes::init_routes)
                .configure(routes::auth_routes::init_routes)
                .configure(routes::email_routes::init_routes),
        )
        .await
    };
}

macro_rules! init_session {
    ($app:expr) => {{
        let req = test::TestRequest::get().uri("/api/session/init").to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        assert_eq!(body["initialized"], json!(true));
        body["session_id"].as_str().expect("session id").to_string()
    }};
}

#[actix_web::test]
async fn session_init_seeds_the_welcome_message() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let session_id = init_session!(app);

    let req = test::TestRequest::get()
        .uri(&format!("/api/chat/history?session_id={session_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], json!("assistant"));
    assert_eq!(messages[0]["feedback"], json!("none"));
}

#[actix_web::test]
async fn chat_rejects_an_uninitialized_session() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"message": "hello", "session_id": "not-a-session"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Session not initialized"));
}

#[actix_web::test]
async fn chat_answers_and_appends_both_turns() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let session_id = init_session!(app);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"message": "hello", "session_id": session_id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let response = body["response"].as_str().expect("response text");
    assert!(response.contains("Hello there"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/chat/history?session_id={session_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], json!("user"));
    assert_eq!(messages[1]["content"], json!("hello"));
    assert_eq!(messages[2]["role"], json!("assistant"));
}

#[actix_web::test]
async fn chat_degrades_to_an_empty_inbox_when_the_backend_is_down() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let session_id = init_session!(app);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"message": "how many emails do I have?", "session_id": session_id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let response = body["response"].as_str().expect("response text");
    assert!(response.contains("**Total emails:** 0"));
    assert!(response.contains("Your inbox is clean!"));
}

#[actix_web::test]
async fn feedback_toggles_on_an_assistant_message() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let session_id = init_session!(app);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"message": "hi", "session_id": session_id}))
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/chat/history?session_id={session_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let messages = body["messages"].as_array().expect("messages array");
    let assistant_id = messages
        .last()
        .and_then(|m| m["id"].as_str())
        .expect("assistant message id")
        .to_string();

    let like = json!({"message_id": assistant_id, "feedback": "like", "session_id": session_id});
    let req = test::TestRequest::post()
        .uri("/api/chat/feedback")
        .set_json(&like)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["feedback"], json!("like"));

    // Repeating the same feedback clears it.
    let req = test::TestRequest::post()
        .uri("/api/chat/feedback")
        .set_json(&like)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["feedback"], json!("none"));

    let req = test::TestRequest::post()
        .uri("/api/chat/feedback")
        .set_json(json!({"message_id": "unknown", "feedback": "like", "session_id": session_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn login_logout_status_flow() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/auth/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], json!(false));

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"password": "54321"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], json!(false));
    assert_eq!(body["error"], json!("Invalid password. Please try again."));

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"password": "12345"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], json!(true));

    let req = test::TestRequest::get().uri("/api/auth/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], json!(true));

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], json!(false));

    let req = test::TestRequest::get().uri("/api/auth/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], json!(false));
}

#[actix_web::test]
async fn email_passthrough_maps_upstream_failures_to_bad_gateway() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/emails").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let req = test::TestRequest::post()
        .uri("/api/fetch-emails")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
