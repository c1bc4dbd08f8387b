// Presentation layer - HTTP routes of the dashboard service
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, load_dashboard, save_dashboard, timeseries};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/load_dashboard", get(load_dashboard))
        .route("/api/save_dashboard", post(save_dashboard))
        .route("/api/timeseries", get(timeseries))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
