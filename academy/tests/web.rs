use academy::{AppState, app, index};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use llm::{GenerationClient, LLMError};
use mentor::Mentor;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct Echo;

#[async_trait]
impl GenerationClient for Echo {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LLMError> {
        Ok(format!("[{max_tokens}] {}", prompt.lines().next().unwrap_or_default()))
    }
}

struct Offline;

#[async_trait]
impl GenerationClient for Offline {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, LLMError> {
        Err(LLMError::Network("connection refused".into()))
    }
}

fn router(client: Arc<dyn GenerationClient>) -> Router {
    app(AppState::new(Mentor::new(client)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn start(app: &Router) -> String {
    let (status, snap) = send(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    snap["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn serves_index_html() {
    let page = index().await;
    assert!(page.0.contains("GenAI Academic Mentor"));
    assert!(page.0.contains("/api/sessions"));
    assert!(page.0.contains("ev.persisted"));
}

#[tokio::test]
async fn new_session_starts_on_welcome_with_zero_counters() {
    let app = router(Arc::new(Echo));
    let (status, snap) = send(&app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(snap["view"], json!({"view": "welcome"}));
    assert_eq!(snap["counters"]["attempts"], 0);
    assert_eq!(snap["counters"]["confused"], 0);
    assert!(snap["started_at"].is_string());
}

#[tokio::test]
async fn explanation_reports_emotion_and_counts() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;

    let (status, reply) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/ask"),
        Some(json!({"task": "explanation", "question": "I am confused about recursion"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["emotion"], "confused");
    assert!(reply["notice"].as_str().unwrap().contains("confused"));
    assert_eq!(reply["text"], "[260] You are an expert teacher.");
    assert_eq!(reply["counters"]["attempts"], 1);
    assert_eq!(reply["counters"]["confused"], 1);

    let (_, snap) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(snap["view"], json!({"view": "dashboard", "mode": "explain"}));
}

#[tokio::test]
async fn quiz_has_no_emotion() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;

    let (status, reply) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/ask"),
        Some(json!({"task": "quiz", "topic": "Newton's Laws", "difficulty": "Hard"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["emotion"], Value::Null);
    assert_eq!(reply["notice"], Value::Null);
    assert!(reply["text"].as_str().unwrap().starts_with("[300]"));
    assert_eq!(reply["counters"]["attempts"], 0);
}

#[tokio::test]
async fn blank_question_is_bad_request() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/ask"),
        Some(json!({"task": "explanation", "question": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a question");
    let (_, snap) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(snap["counters"]["attempts"], 0);
}

#[tokio::test]
async fn out_of_range_days_is_bad_request() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/ask"),
        Some(json!({"task": "study_plan", "topic": "Algebra", "days": 2, "daily_time": "1 hour"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("days"));
}

async fn ask_with(app: &Router, body: Value) -> (StatusCode, Value) {
    let id = start(app).await;
    send(app, "POST", &format!("/api/sessions/{id}/ask"), Some(body)).await
}

#[tokio::test]
async fn quiz_without_difficulty_is_bad_request() {
    let app = router(Arc::new(Echo));
    let (status, body) = ask_with(&app, json!({"task": "quiz", "topic": "Optics"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("invalid parameters"));
    assert!(message.contains("difficulty"));
}

#[tokio::test]
async fn unknown_daily_time_is_bad_request() {
    let app = router(Arc::new(Echo));
    let (status, body) = ask_with(
        &app,
        json!({"task": "study_plan", "topic": "Algebra", "days": 7, "daily_time": "5 hours"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid parameters"));
}

#[tokio::test]
async fn negative_days_is_bad_request() {
    let app = router(Arc::new(Echo));
    let (status, body) = ask_with(
        &app,
        json!({"task": "study_plan", "topic": "Algebra", "days": -1, "daily_time": "1 hour"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid parameters"));
}

#[tokio::test]
async fn unknown_view_is_bad_request() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/view"),
        Some(json!({"view": "dashboard", "mode": "homework"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid parameters"));
    let (_, snap) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(snap["view"], json!({"view": "welcome"}));
}

#[tokio::test]
async fn generation_failure_is_bad_gateway() {
    let app = router(Arc::new(Offline));
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/ask"),
        Some(json!({"task": "explanation", "question": "I feel stressed"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("generation unavailable"));
    let (_, snap) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(snap["counters"]["stressed"], 1);
}

#[tokio::test]
async fn sessions_do_not_share_counters() {
    let app = router(Arc::new(Echo));
    let a = start(&app).await;
    let b = start(&app).await;

    send(
        &app,
        "POST",
        &format!("/api/sessions/{a}/ask"),
        Some(json!({"task": "explanation", "question": "this is easy"})),
    )
    .await;

    let (_, snap_a) = send(&app, "GET", &format!("/api/sessions/{a}"), None).await;
    let (_, snap_b) = send(&app, "GET", &format!("/api/sessions/{b}"), None).await;
    assert_eq!(snap_a["counters"]["confident"], 1);
    assert_eq!(snap_b["counters"]["confident"], 0);
    assert_eq!(snap_b["counters"]["attempts"], 0);
}

#[tokio::test]
async fn view_can_be_changed() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;

    let (status, snap) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/view"),
        Some(json!({"view": "dashboard", "mode": "study_plan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["view"], json!({"view": "dashboard", "mode": "study_plan"}));

    let (_, snap) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/view"),
        Some(json!({"view": "welcome"})),
    )
    .await;
    assert_eq!(snap["view"], json!({"view": "welcome"}));
}

#[tokio::test]
async fn ended_session_is_gone() {
    let app = router(Arc::new(Echo));
    let id = start(&app).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/ask"),
        Some(json!({"task": "explanation", "question": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_ok() {
    let app = router(Arc::new(Echo));
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
