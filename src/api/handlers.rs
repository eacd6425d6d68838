// src/api/handlers.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;

use crate::api::{types::*, ApiState};
use crate::core::journal::SAVED_MESSAGE;
use crate::core::resources::{self, HELPLINES};
use crate::core::session::{MoodView, SessionSnapshot};
use crate::infra::errors::CompanionError;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a companion error onto an HTTP status and JSON body.
pub fn error_response(e: CompanionError) -> ApiError {
    let status = match &e {
        CompanionError::Validation(_) => StatusCode::BAD_REQUEST,
        CompanionError::UnknownTask { .. } | CompanionError::SessionNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        CompanionError::Authentication { .. } | CompanionError::Upstream { .. } => {
            StatusCode::BAD_GATEWAY
        }
        CompanionError::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
        CompanionError::Config(_) | CompanionError::Io(_) | CompanionError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// POST /api/v1/sessions — Start a new, empty session.
pub async fn create_session(
    State(state): State<ApiState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let (_, handle) = state.sessions.create().await;
    let snapshot = handle.snapshot().await;
    (StatusCode::CREATED, Json(snapshot))
}

/// GET /api/v1/sessions/:id — Everything the UI renders for one session.
pub async fn get_session(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = state.sessions.get(&id).await.map_err(error_response)?;
    let snapshot = handle.snapshot().await;
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id — End a session and drop its state.
pub async fn end_session(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.end(&id).await.map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/messages — Run one chat turn.
///
/// Only the turn lock is held across the gateway call, so tasks, mood and
/// journal stay available meanwhile. Responds as soon as the reply is
/// recorded; mood classification runs in a spawned task afterwards and only
/// touches the mood ledger.
pub async fn post_message(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let handle = state.sessions.get(&id).await.map_err(error_response)?;

    let (reply, turns) = {
        let _turn = handle.turn.lock().await;
        let turn_time = Local::now();

        let request = state
            .companion
            .prepare_turn(&mut *handle.conversation.lock().await, &body.text)
            .map_err(error_response)?;

        let reply = state
            .companion
            .request_reply(request)
            .await
            .map_err(error_response)?;

        let mut conversation = handle.conversation.lock().await;
        conversation.push_assistant(reply.clone());
        let turns = conversation.completed_turns();
        drop(conversation);

        let companion = state.companion.clone();
        let session = handle.clone();
        let text = body.text;
        tokio::spawn(async move {
            if let Some(level) = companion.classify(&text).await {
                session.mood.lock().await.record_at(level, turn_time);
                tracing::debug!(session = %id, level = level.value(), "Mood recorded");
            }
        });

        (reply, turns)
    };

    Ok(Json(ReplyResponse { reply, turns }))
}

/// GET /api/v1/sessions/:id/mood — Trend data for the mood chart.
pub async fn get_mood(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MoodView>, ApiError> {
    let handle = state.sessions.get(&id).await.map_err(error_response)?;
    let mood = handle.mood.lock().await;
    Ok(Json(MoodView::from(&*mood)))
}

/// POST /api/v1/sessions/:id/tasks/:name/toggle — Flip one checklist item.
pub async fn toggle_task(
    State(state): State<ApiState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<TaskToggled>, ApiError> {
    let handle = state.sessions.get(&id).await.map_err(error_response)?;
    let done = handle
        .tasks
        .lock()
        .await
        .toggle(&name)
        .map_err(error_response)?;
    Ok(Json(TaskToggled { name, done }))
}

/// POST /api/v1/sessions/:id/journal — Save a private note.
pub async fn save_journal(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<JournalRequest>,
) -> Result<(StatusCode, Json<JournalSaved>), ApiError> {
    let handle = state.sessions.get(&id).await.map_err(error_response)?;
    let mut journal = handle.journal.lock().await;
    let entry = journal
        .save(&body.text)
        .map_err(error_response)?
        .clone();
    Ok((
        StatusCode::CREATED,
        Json(JournalSaved {
            message: SAVED_MESSAGE.into(),
            entry,
        }),
    ))
}

/// GET /api/v1/resources — Breathing exercise and helplines.
pub async fn get_resources() -> Json<ResourcesResponse> {
    Json(ResourcesResponse {
        breathing: resources::four_seven_eight(),
        helplines: HELPLINES,
    })
}

/// GET /api/v1/health — Simple health check.
pub async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "gateway": state.companion.provider_id(),
        "gateway_name": state.companion.provider_name(),
        "sessions": state.sessions.len().await,
    }))
}
