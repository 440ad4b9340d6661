use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{
        ActionRequest, ChatRequest, ChatResponse, CreateSessionRequest, CreateSessionResponse,
        VisibilityResponse,
    },
    services::conversation::{run_follow_up, start_session, submit_message},
    services::metrics_manager::MetricsData,
    services::session_manager::SessionSnapshot,
    state::SharedState,
};

pub async fn create_session_handler(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSessionRequest>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = start_session(&state, &payload.page_path).await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

pub async fn get_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(&session_id).await?))
}

pub async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove_session(&session_id).await {
        tracing::debug!(%session_id, "session torn down");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("session {session_id}")))
    }
}

pub async fn open_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<VisibilityResponse>, AppError> {
    let is_open = state.sessions.set_open(&session_id, true).await?;
    Ok(Json(VisibilityResponse { session_id, is_open }))
}

pub async fn close_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<VisibilityResponse>, AppError> {
    let is_open = state.sessions.set_open(&session_id, false).await?;
    Ok(Json(VisibilityResponse { session_id, is_open }))
}

pub async fn toggle_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<VisibilityResponse>, AppError> {
    let is_open = state.sessions.toggle(&session_id).await?;
    Ok(Json(VisibilityResponse { session_id, is_open }))
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let outcome = submit_message(&state, &payload.session_id, &payload.message)
        .await?
        .ok_or_else(|| AppError::BadRequest("Message cannot be empty".to_string()))?;

    Ok(Json(ChatResponse {
        session_id: payload.session_id,
        intent: outcome.intent,
        user: outcome.user,
        reply: outcome.reply,
    }))
}

pub async fn action_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let outcome = run_follow_up(
        &state,
        &payload.session_id,
        payload.message_id,
        payload.action_index,
    )
    .await?;

    Ok(Json(ChatResponse {
        session_id: payload.session_id,
        intent: outcome.intent,
        user: outcome.user,
        reply: outcome.reply,
    }))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
