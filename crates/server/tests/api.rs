//! End-to-end tests through the router

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use yoga_agent_config::Settings;
use yoga_agent_persistence::{
    ensure_default_user, seed_catalog, PersistenceLayer, PracticeSessionStore,
};
use yoga_agent_server::{create_router, AppState};

async fn app_with_settings(seeded: bool, settings: Settings) -> (Router, AppState) {
    let persistence = PersistenceLayer::in_memory();
    if seeded {
        seed_catalog(persistence.catalog.as_ref()).await.unwrap();
    }
    ensure_default_user(persistence.users.as_ref()).await.unwrap();
    let state = AppState::new(settings, persistence);
    (create_router(state.clone()), state)
}

async fn app(seeded: bool) -> Router {
    app_with_settings(seeded, Settings::default()).await.0
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.unwrap_or("").to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(&body.to_string())).await
}

#[tokio::test]
async fn test_chat_greeting_in_hindi() {
    let app = app(true).await;
    let (status, body) = post(&app, "/api/chat-analyze", json!({"message": "kaise ho"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detected_language"], "hindi");
    assert_eq!(body["emotion"], "neutral");
    assert_eq!(body["intensity"], 3);
    assert_eq!(body["conversation_stage"], "simple_greeting");
    assert_eq!(body["ready_for_yoga"], false);
    assert_eq!(body["follow_up_questions"], json!([]));
    assert_eq!(body["yoga_message"], "");
}

#[tokio::test]
async fn test_chat_validation() {
    let app = app(true).await;

    let (status, body) = post(&app, "/api/chat-analyze", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");

    let (status, body) = post(&app, "/api/chat-analyze", json!({"message": " a "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a longer message");

    let (status, body) = send(&app, "POST", "/api/chat-analyze", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

    let (status, body) = send(&app, "POST", "/api/voice-chat", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn test_voice_chat_conversation_id() {
    let app = app(true).await;

    let (status, body) = post(&app, "/api/voice-chat", json!({"message": "Busy at the office"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "How's work going? Keeping busy?");
    assert_eq!(body["detected_language"], "english");
    assert_eq!(body["conversation_turns"], 0);
    assert!(body.get("conversation_id").is_none());

    let (_, body) = post(
        &app,
        "/api/voice-chat",
        json!({"message": "kaise ho", "conversation_id": "device-7"}),
    )
    .await;
    assert_eq!(body["conversation_id"], "device-7");
    assert_eq!(body["response"], "Main theek hun! Tum kaise ho? Kya interesting hua?");
    assert_eq!(body["detected_language"], "hindi");

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["checks"]["conversations"], 1);
}

#[tokio::test]
async fn test_voice_chat_never_fails_on_a_full_registry() {
    let mut settings = Settings::default();
    settings.registry.max_conversations = 3;
    let (app, state) = app_with_settings(true, settings).await;

    for _ in 0..10 {
        let (status, body) = post(
            &app,
            "/api/voice-chat",
            json!({"message": "I feel awful", "conversation_history": []}),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }
    assert_eq!(state.conversations.count(), 0);

    for i in 0..10 {
        let (status, body) = post(
            &app,
            "/api/voice-chat",
            json!({"message": "I feel awful", "conversation_id": format!("device-{}", i)}),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["conversation_id"], format!("device-{}", i));
    }
    assert_eq!(state.conversations.count(), 3);
    assert!(state.conversations.get("device-9").is_some());
    assert!(state.conversations.get("device-0").is_none());
}

#[tokio::test]
async fn test_voice_chat_yoga_gate() {
    let app = app(true).await;
    let history = json!([
        {"sender": "user", "content": "one"},
        {"sender": "system", "content": "ok"},
        {"sender": "user", "content": "two"},
        {"sender": "user", "content": "three"}
    ]);

    let (status, body) = post(
        &app,
        "/api/voice-chat",
        json!({"message": "I feel terrible and awful", "conversation_history": history}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotion"], "stressed");
    assert_eq!(body["conversation_turns"], 3);
    assert_eq!(body["ready_for_yoga"], true);
}

#[tokio::test]
async fn test_analyze_conversation() {
    let app = app(true).await;

    let (status, body) = post(&app, "/api/analyze-conversation", json!({"x": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Conversation history is required");

    let (status, body) = post(
        &app,
        "/api/analyze-conversation",
        json!({"conversation_history": [{"sender": "system", "content": "Welcome"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No user messages found");

    let (status, body) = post(
        &app,
        "/api/analyze-conversation",
        json!({"conversation_history": [
            {"sender": "user", "content": "kaise ho"},
            {"sender": "system", "content": "theek"}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotion"], "happy");
    assert_eq!(
        body["yoga_message"],
        "A balanced, energizing flow for overall wellness and positivity!"
    );
    assert_eq!(body["conversation_analysis"], "Analyzed 1 messages");
}

#[tokio::test]
async fn test_practice_session_lifecycle() {
    let (app, state) = app_with_settings(true, Settings::default()).await;

    let (status, body) = post(
        &app,
        "/api/session/start",
        json!({"emotion": "anxious", "intensity": "4"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sequence"]["name"], "Anxiety Relief Flow");
    assert_eq!(body["sequence"]["total_duration"], 1050);
    let asanas = body["sequence"]["asanas"].as_array().unwrap();
    assert_eq!(asanas.len(), 5);
    assert_eq!(asanas[0]["name"], "Mountain Pose");
    assert_eq!(asanas[0]["duration"], 90);

    let id = body["session_id"].as_i64().unwrap();
    let sequence_id = body["sequence"]["id"].as_i64().unwrap();

    let stored = state.persistence.sessions.get(id).await.unwrap().unwrap();
    assert!(!stored.completed);
    assert_eq!(stored.emotion, "anxious");
    assert_eq!(stored.intensity, 4);
    assert_eq!(stored.sequence_id, sequence_id);

    let (status, body) = post(
        &app,
        &format!("/api/session/{}/update", id),
        json!({"duration": 120}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session updated successfully");

    let (status, body) = post(
        &app,
        &format!("/api/session/{}/complete", id),
        json!({"duration": "soon"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duration must be a number");

    let (status, body) = post(
        &app,
        &format!("/api/session/{}/complete", id),
        json!({"duration": 1000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session completed successfully");

    let stored = state.persistence.sessions.get(id).await.unwrap().unwrap();
    assert!(stored.completed);
    assert_eq!(stored.duration, Some(1000));
    assert_eq!(stored.emotion, "anxious");
    assert_eq!(stored.sequence_id, sequence_id);
}

#[tokio::test]
async fn test_session_not_found_precedes_body_check() {
    let app = app(true).await;

    let (status, body) = send(&app, "POST", "/api/session/999/update", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");

    let (status, body) = send(&app, "POST", "/api/session/abc/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");

    let (_, started) = post(
        &app,
        "/api/session/start",
        json!({"emotion": "sad", "intensity": 2}),
    )
    .await;
    let id = started["session_id"].as_i64().unwrap();
    let (status, body) = post(&app, &format!("/api/session/{}/update", id), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No JSON data provided");
}

#[tokio::test]
async fn test_session_start_fallbacks() {
    let (app, state) = app_with_settings(true, Settings::default()).await;

    // No happy sequence is bundled, so neutral lands on the first one
    let (status, body) = post(
        &app,
        "/api/session/start",
        json!({"emotion": "neutral", "intensity": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sequence"]["name"], "Anxiety Relief Flow");

    let id = body["session_id"].as_i64().unwrap();
    let stored = state.persistence.sessions.get(id).await.unwrap().unwrap();
    assert_eq!(stored.emotion, "happy");
    assert_eq!(stored.intensity, 3);

    let (status, body) = post(
        &app,
        "/api/session/start",
        json!({"emotion": "sad", "intensity": 9}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "intensity must be between 1 and 5");

    let (status, body) = send(&app, "POST", "/api/session/start", Some("null")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No JSON data provided");
}

#[tokio::test]
async fn test_session_start_on_empty_catalog() {
    let app = app(false).await;
    let (status, body) = post(
        &app,
        "/api/session/start",
        json!({"emotion": "tired", "intensity": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["debug_info"], "No yoga sequences found in database");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Database not initialized"));
}

#[tokio::test]
async fn test_asana_lookup() {
    let app = app(true).await;

    let (status, body) = send(&app, "GET", "/api/asanas/6", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tree Pose");
    assert_eq!(body["sanskrit_name"], "Vrksasana");
    assert!(body["steps"].as_array().unwrap().len() >= 3);
    assert!(body.get("difficulty").is_some());

    let (status, body) = send(&app, "GET", "/api/asanas/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Asana not found");
}

#[tokio::test]
async fn test_debug_database() {
    let app = app(true).await;
    let (status, body) = send(&app, "GET", "/api/debug/database", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asanas"], 11);
    assert_eq!(body["sequences"], 6);
    assert_eq!(body["users"], 1);
    assert_eq!(body["database_status"], "initialized");
    assert_eq!(body["available_emotions"][5], "tired");

    let empty = app_without_catalog().await;
    let (_, body) = send(&empty, "GET", "/api/debug/database", None).await;
    assert_eq!(body["database_status"], "empty");
}

async fn app_without_catalog() -> Router {
    app(false).await
}

#[tokio::test]
async fn test_health() {
    let app = app(true).await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"], "ok");
}
