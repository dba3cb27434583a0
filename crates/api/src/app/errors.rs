use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use larder_ai::AiError;
use larder_core::DomainError;
use larder_infra::{PantryServiceError, PantryStoreError};

pub fn pantry_error_to_response(err: PantryServiceError) -> axum::response::Response {
    match err {
        PantryServiceError::Domain(domain) => domain_error_to_response(domain),
        PantryServiceError::Store(PantryStoreError::Timeout) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "store_timeout",
            "storage deadline exceeded, retry the request",
        ),
        PantryServiceError::Store(store) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            store.to_string(),
        ),
    }
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match &err {
        DomainError::UnitMismatch { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "unit_mismatch", err.to_string())
        }
        DomainError::InsufficientStock { .. } => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "insufficient_stock",
            err.to_string(),
        ),
        DomainError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    // The backend is opaque to callers; everything surfaces as an upstream
    // service failure.
    json_error(StatusCode::BAD_GATEWAY, "llm_error", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
