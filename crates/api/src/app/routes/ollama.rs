//! Ollama-compatible dialect: the minimum surface a WebUI-style client needs
//! to treat this server as a model host, so attention can stay on the LLM
//! side instead of the UI. The only handler with real behavior is `chat`.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(heartbeat))
        .route("/api/chat", post(chat))
        .route("/api/tags", get(tags))
        .route("/api/version", get(version))
        .fallback(unhandled)
}

pub async fn heartbeat() -> impl IntoResponse {
    tracing::info!("ollama heartbeat");
    Json(json!({ "status": "ok" }))
}

/// Chat ignores everything but the last message: clients resend the whole
/// conversation, while this server keeps its own durable memory.
pub async fn chat(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::OllamaChatRequest>,
) -> axum::response::Response {
    tracing::info!(
        model = body.model.as_deref().unwrap_or("-"),
        stream = body.stream.unwrap_or(false),
        turns = body.messages.len(),
        "incoming ollama chat request"
    );

    let Some(last) = body.messages.last() else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "messages must not be empty",
        );
    };

    match services.orchestrator().call(&last.content).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(dto::OllamaChatResponse::completed(reply)),
        )
            .into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

pub async fn tags() -> impl IntoResponse {
    Json(dto::model_catalog())
}

pub async fn version() -> impl IntoResponse {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

/// `GET /api/models` at the root — the shape some WebUI clients probe for.
pub async fn models() -> impl IntoResponse {
    let catalog = dto::model_catalog();
    let models: Vec<serde_json::Value> = catalog
        .models
        .iter()
        .map(|m| {
            json!({
                "id": m.name,
                "model": m.model,
                "name": m.name,
                "modified_at": m.modified_at,
                "size": m.size,
                "digest": m.digest,
                "details": {
                    "format": m.details.format,
                    "family": m.details.family,
                    "parameter_size": m.details.parameter_size,
                    "quantization_level": m.details.quantization_level,
                },
            })
        })
        .collect();

    Json(json!({ "models": models }))
}

/// Log whatever unknown endpoint a client probed, then refuse it.
pub async fn unhandled(method: Method, uri: Uri) -> axum::response::Response {
    tracing::warn!(%method, %uri, "undefined ollama path accessed");
    StatusCode::UNPROCESSABLE_ENTITY.into_response()
}
