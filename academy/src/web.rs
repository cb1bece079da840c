use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use mentor::{
    EmotionLabel, Mentor, MentorError, SessionContext, SessionCounters, SessionRegistry,
    TaskParameters, TaskType, ViewState,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub mentor: Arc<Mentor>,
    pub sessions: Arc<Mutex<SessionRegistry>>,
}

impl AppState {
    pub fn new(mentor: Mentor) -> Self {
        Self {
            mentor: Arc::new(mentor),
            sessions: Arc::new(Mutex::new(SessionRegistry::new())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown session {0}")]
    UnknownSession(Uuid),
    #[error(transparent)]
    Mentor(#[from] MentorError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownSession(_) => StatusCode::NOT_FOUND,
            ApiError::Mentor(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Mentor(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Unwrap a JSON body, reporting a malformed one as invalid parameters.
fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(MentorError::InvalidParameters(rejection.body_text()).into()),
    }
}

#[derive(Serialize)]
struct SessionSnapshot {
    id: Uuid,
    started_at: DateTime<Utc>,
    counters: SessionCounters,
    view: ViewState,
}

impl From<&SessionContext> for SessionSnapshot {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            id: ctx.id,
            started_at: ctx.started_at,
            counters: ctx.counters,
            view: ctx.view,
        }
    }
}

#[derive(Serialize)]
struct AskResponse {
    task: TaskType,
    emotion: Option<EmotionLabel>,
    notice: Option<&'static str>,
    text: String,
    counters: SessionCounters,
}

/// Serve the embedded `index.html`.
pub async fn index() -> Html<&'static str> {
    static INDEX: &str = include_str!("../static/index.html");
    Html(INDEX)
}

async fn health() -> &'static str {
    "ok"
}

async fn start_session(State(state): State<AppState>) -> (StatusCode, Json<SessionSnapshot>) {
    let mut sessions = state.sessions.lock().await;
    let snapshot = SessionSnapshot::from(sessions.start());
    info!(session = %snapshot.id, live = sessions.live(), "session started");
    (StatusCode::CREATED, Json(snapshot))
}

async fn show_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let sessions = state.sessions.lock().await;
    let ctx = sessions.get(&id).ok_or(ApiError::UnknownSession(id))?;
    Ok(Json(SessionSnapshot::from(ctx)))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let ctx = sessions.end(&id).ok_or(ApiError::UnknownSession(id))?;
    info!(session = %id, attempts = ctx.counters.attempts, "session ended");
    Ok(StatusCode::NO_CONTENT)
}

async fn set_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ViewState>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let ctx = sessions.get_mut(&id).ok_or(ApiError::UnknownSession(id))?;
    match payload(body)? {
        ViewState::Welcome => ctx.view = ViewState::Welcome,
        ViewState::Dashboard(mode) => ctx.select_mode(mode),
    }
    debug!(session = %id, view = ?ctx.view, "view changed");
    Ok(Json(SessionSnapshot::from(&*ctx)))
}

/// Answer one student request.
///
/// The session lock is released before the model is called so a slow
/// generation never blocks other sessions.
async fn ask(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<TaskParameters>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    if state.sessions.lock().await.get(&id).is_none() {
        return Err(ApiError::UnknownSession(id));
    }

    let prepared = payload(body)
        .and_then(|params| state.mentor.prepare(params).map_err(ApiError::from))
        .inspect_err(|e| {
            warn!(session = %id, error = %e, "request rejected");
        })?;

    let counters = {
        let mut sessions = state.sessions.lock().await;
        let ctx = sessions.get_mut(&id).ok_or(ApiError::UnknownSession(id))?;
        ctx.record_prepared(&prepared);
        ctx.counters
    };

    let text = state.mentor.complete(&prepared).await.inspect_err(|e| {
        error!(session = %id, error = %e, "generation failed");
    })?;

    Ok(Json(AskResponse {
        task: prepared.task,
        emotion: prepared.emotion,
        notice: prepared.emotion.map(|label| label.notice()),
        text,
        counters,
    }))
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/sessions", post(start_session))
        .route("/api/sessions/{id}", get(show_session).delete(end_session))
        .route("/api/sessions/{id}/view", post(set_view))
        .route("/api/sessions/{id}/ask", post(ask))
        .with_state(state)
}
