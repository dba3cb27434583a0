use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use larder_pantry::{ConsumeRequest, RestockRequest};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_food))
        .route("/restock", post(restock))
        .route("/consume", post(consume))
}

pub async fn get_food(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.pantry().get_food().await {
        Ok(entries) => (StatusCode::OK, Json(dto::entries_to_json(&entries))).into_response(),
        Err(e) => errors::pantry_error_to_response(e),
    }
}

pub async fn restock(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BatchRequest>,
) -> axum::response::Response {
    let request = RestockRequest {
        items: body.into_items(),
    };

    match services.pantry().save_food(request).await {
        Ok(saved) => (StatusCode::OK, Json(dto::entries_to_json(&saved))).into_response(),
        Err(e) => errors::pantry_error_to_response(e),
    }
}

pub async fn consume(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BatchRequest>,
) -> axum::response::Response {
    let request = ConsumeRequest {
        items: body.into_items(),
    };

    match services.pantry().use_food(request).await {
        Ok(saved) => (StatusCode::OK, Json(dto::entries_to_json(&saved))).into_response(),
        Err(e) => errors::pantry_error_to_response(e),
    }
}
