use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use mindcare_rust::{
    chat::ChatService,
    config::ChatConfig,
    server::{self, AppState},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`
use uuid::Uuid;

fn create_test_app() -> (Router, ChatService) {
    let config = ChatConfig {
        response_delay_ms: 0,
        ..ChatConfig::default()
    };
    let chat = ChatService::seeded(&config, 42);
    let app = server::router(AppState { chat: chat.clone() });
    (app, chat)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn listing_starts_with_the_seeded_session() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/sessions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["title"], "General Support Chat");
    assert_eq!(sessions[0]["risk_level"], "low");
    assert_eq!(sessions[0]["message_count"], 1);
    assert_eq!(sessions[0]["awaiting_response"], false);
}

#[tokio::test]
async fn creating_a_session_returns_it() {
    let (app, chat) = create_test_app();

    let response = app
        .oneshot(post_json("/sessions", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Chat 2");
    assert_eq!(body["risk_level"], "low");
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);

    // The new session became active.
    let created: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert_eq!(chat.active_conversation().await.unwrap().id, created);
}

#[tokio::test]
async fn submitting_a_message_returns_the_exchange() {
    let (app, chat) = create_test_app();
    let id = chat.active_conversation().await.unwrap().id;

    let response = app
        .oneshot(post_json(
            &format!("/sessions/{id}/messages"),
            json!({ "content": "I feel good and grateful today" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["session_id"], id.to_string());
    assert_eq!(body["user_message"]["sentiment"], "positive");
    assert_eq!(body["risk_level"], "low");
    assert!(body.get("crisis_banner").is_none());
    assert!(!body["reply"]["content"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn crisis_message_carries_the_support_banner() {
    let (app, chat) = create_test_app();
    let id = chat.active_conversation().await.unwrap().id;

    let response = app
        .oneshot(post_json(
            &format!("/sessions/{id}/messages"),
            json!({ "content": "I want to end my life" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["risk_level"], "crisis");
    assert_eq!(
        body["crisis_banner"],
        "Crisis Support: Call 1800-XXX-XXXX immediately or text 988"
    );
}

#[tokio::test]
async fn empty_message_is_a_bad_request() {
    let (app, chat) = create_test_app();
    let id = chat.active_conversation().await.unwrap().id;

    let response = app
        .oneshot(post_json(
            &format!("/sessions/{id}/messages"),
            json!({ "content": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was appended.
    assert_eq!(chat.conversation(id).await.unwrap().messages.len(), 1);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (app, _) = create_test_app();
    let missing = Uuid::new_v4();

    let response = app
        .oneshot(get(&format!("/sessions/{missing}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_the_last_session_conflicts() {
    let (app, chat) = create_test_app();
    let id = chat.active_conversation().await.unwrap().id;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(chat.list_conversations().await.len(), 1);

    // With a second session around, deletion goes through.
    let second = chat.create_conversation().await.id;
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/sessions/{second}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(chat.list_conversations().await.len(), 1);
}

#[tokio::test]
async fn activate_switches_the_active_session() {
    let (app, chat) = create_test_app();
    let first = chat.active_conversation().await.unwrap().id;
    chat.create_conversation().await;

    let response = app
        .oneshot(post_json(
            &format!("/sessions/{first}/activate"),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(chat.active_conversation().await.unwrap().id, first);
}

#[tokio::test]
async fn export_returns_the_requested_format() {
    let (app, chat) = create_test_app();
    let id = chat.active_conversation().await.unwrap().id;
    chat.submit_user_message(id, "hello there").await.unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/sessions/{id}/export?format=json")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = body_json(response).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);

    // Text is the default format.
    let response = app
        .oneshot(get(&format!("/sessions/{id}/export")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("MindCare Connect - Chat Session\n"));
}

#[tokio::test]
async fn unknown_export_format_is_a_bad_request() {
    let (app, chat) = create_test_app();
    let id = chat.active_conversation().await.unwrap().id;

    let response = app
        .oneshot(get(&format!("/sessions/{id}/export?format=csv")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
