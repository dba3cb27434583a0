use axum::{routing::get, Router};

pub mod chat;
pub mod ollama;
pub mod pantry;
pub mod system;

/// Router for all application endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/pantry", pantry::router())
        .nest("/curl", chat::router())
        .nest("/ollama", ollama::router())
        .route("/ollama/", get(ollama::heartbeat))
        .route("/api/models", get(ollama::models))
}
