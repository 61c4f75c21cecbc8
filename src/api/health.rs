use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{ml::ModelKind, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    models: Vec<ArtifactHealth>,
    scaler: ArtifactHealth,
}

/// Load status of one artifact
#[derive(Debug, Serialize)]
pub struct ArtifactHealth {
    name: String,
    loaded: bool,
}

/// GET /health - Artifact load report
///
/// Always 200: the service still answers with whatever loaded. `degraded`
/// means at least one model or the scaler is missing.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let models: Vec<ArtifactHealth> = ModelKind::iter()
        .map(|kind| ArtifactHealth {
            name: kind.name().to_string(),
            loaded: state.registry.model(kind).is_some(),
        })
        .collect();
    let scaler = ArtifactHealth {
        name: "scaler".to_string(),
        loaded: state.registry.scaler().is_some(),
    };

    let all_loaded = scaler.loaded && models.iter().all(|m| m.loaded);

    let response = HealthResponse {
        status: if all_loaded {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: chrono::Utc::now(),
        models,
        scaler,
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
