pub mod error;
pub mod form;
pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, state::AppState};

pub fn router(state: AppState, cfg: &Config) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/form/:model_type", get(pages::prediction_form))
        .route("/submit_form", post(pages::submit_form))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                )))
                .layer(CatchPanicLayer::custom(error::panic_response)),
        )
        .layer(TraceLayer::new_for_http())
}
