use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::infrastructure::repositories::ModelHandle;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(model): State<ModelHandle>) -> impl IntoResponse {
    if model.is_ready().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "model": model.name(),
                "sample_rate": model.sample_rate()
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "model": model.name(),
                "sample_rate": model.sample_rate()
            })),
        )
    }
}
