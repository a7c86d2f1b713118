use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::quota::QuotaLimits;
use crate::services::session::{BookingSession, GridSnapshot, ToggleResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub selected_slots: Vec<String>,
    pub message: Option<String>,
}

// POST /api/session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<GridSnapshot>,
) -> Result<Json<SessionResponse>, AppError> {
    let defaults = QuotaLimits {
        max_per_day: state.config.max_slots_per_day,
        max_per_week: state.config.max_slots_per_week,
    };
    let today = chrono::Local::now().date_naive();

    if let Some(id) = &snapshot.current_workshop_id {
        tracing::debug!(workshop = %id, "session edits an existing workshop");
    }

    let session = BookingSession::new(snapshot, defaults, today)
        .map_err(|e| AppError::Snapshot(e.to_string()))?;

    tracing::info!(role = session.role().as_code(), "booking session started");

    let response = SessionResponse {
        selected_slots: session.selection_keys(),
        message: None,
    };
    *state.session.lock().unwrap() = Some(session);
    Ok(Json(response))
}

// GET /api/session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, AppError> {
    let guard = state.session.lock().unwrap();
    let session = guard.as_ref().ok_or(AppError::NoSession)?;
    Ok(Json(SessionResponse {
        selected_slots: session.selection_keys(),
        message: session.message().map(String::from),
    }))
}

// POST /api/session/toggle
#[derive(Deserialize)]
pub struct ToggleRequest {
    pub day: String,
    pub time: String,
}

pub async fn toggle_slot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ToggleResult>, AppError> {
    let now = chrono::Local::now().naive_local();

    let mut guard = state.session.lock().unwrap();
    let session = guard.as_mut().ok_or(AppError::NoSession)?;

    let result = session.toggle(&request.day, &request.time, now)?;
    Ok(Json(result))
}

// POST /api/session/clear
pub async fn clear_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut guard = state.session.lock().unwrap();
    let session = guard.as_mut().ok_or(AppError::NoSession)?;
    session.clear();
    Ok(Json(SessionResponse {
        selected_slots: Vec::new(),
        message: None,
    }))
}
