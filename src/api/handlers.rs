//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    input::{parse_preset, InputError},
    state::{AppState, TimerSnapshot},
};
use super::responses::{
    ApiResponse, DurationRequest, ErrorResponse, HealthResponse, PresetsResponse, StatusResponse,
};

type HandlerResult = Result<Json<ApiResponse>, (StatusCode, Json<ErrorResponse>)>;

fn respond(action: &str, result: Result<TimerSnapshot, String>, message: String) -> HandlerResult {
    match result {
        Ok(snapshot) => {
            info!("{} endpoint called - timer at {}", action, snapshot.display);
            Ok(Json(ApiResponse::new(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e))))
        }
    }
}

fn reject(error: InputError) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Rejected duration input: {}", error);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error.to_string())))
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("start", state.start().await, "Timer started".to_string())
}

/// Handle POST /stop - Stop the countdown, keeping remaining time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("stop", state.stop().await, "Timer stopped".to_string())
}

/// Handle POST /toggle - Play/stop button
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("toggle", state.toggle().await, "Timer toggled".to_string())
}

/// Handle POST /preset/:index - Select a configured preset
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> HandlerResult {
    let (label, duration_ms) = state.presets.select(index).map_err(reject)?;
    let message = format!("Preset {} selected", label);
    respond("preset", state.configure("preset", duration_ms).await, message)
}

/// Handle POST /duration - Set a preset string or selector seconds
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> HandlerResult {
    let (action, duration_ms) = match &request {
        DurationRequest::Preset { preset } => ("duration-preset", parse_preset(preset)),
        DurationRequest::Seconds { seconds } => ("duration-seconds", state.selector.to_ms(*seconds)),
    };
    let duration_ms = duration_ms.map_err(reject)?;
    respond(action, state.configure(action, duration_ms).await, "Duration set".to_string())
}

/// Handle POST /pause - Screen went inactive, release the cue
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("pause", state.pause().await, "Finish cue released".to_string())
}

/// Handle POST /resume - Screen became active, acquire the cue
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    respond("resume", state.resume().await, "Finish cue acquired".to_string())
}

/// Handle GET /presets - List the input sources
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: state.presets.labels().to_vec(),
        max_seconds: state.selector.max_seconds(),
    })
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
