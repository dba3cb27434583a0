//! The simple chat dialect: one message in, one reply out. Meant for poking
//! the LLM side from the command line when no chat UI is around.

use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde_json::json;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/chat", post(chat))
}

pub async fn chat(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ChatRequest>,
) -> axum::response::Response {
    tracing::info!("incoming chat request");

    match services.orchestrator().call(&body.message).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "reply": reply }))).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}
