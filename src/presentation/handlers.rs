// HTTP request handlers
use crate::domain::chart_data::sample_timeseries;
use crate::domain::dashboard::DashboardSnapshot;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub const NOT_FOUND_DETAIL: &str = "Dashboard state not found";

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Return the last saved snapshot
pub async fn load_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match state.snapshot_service.load().await {
        Ok(Some(snapshot)) => Json(snapshot).into_response(),
        Ok(None) => detail(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL),
        Err(e) => {
            tracing::error!("Error loading dashboard state: {:#}", e);
            detail(StatusCode::INTERNAL_SERVER_ERROR, "Dashboard state could not be read")
        }
    }
}

/// Replace the saved snapshot
pub async fn save_dashboard(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return detail(rejection.status(), rejection.body_text()),
    };

    let snapshot = match DashboardSnapshot::decode(payload) {
        Ok(snapshot) => snapshot,
        Err(e) => return detail(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    match state.snapshot_service.save(snapshot).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => {
            tracing::error!("Error saving dashboard state: {:#}", e);
            detail(StatusCode::INTERNAL_SERVER_ERROR, "Dashboard state could not be saved")
        }
    }
}

/// Sample chart payload for trying out widgets
pub async fn timeseries() -> Json<Value> {
    Json(sample_timeseries(chrono::Local::now().date_naive()))
}
