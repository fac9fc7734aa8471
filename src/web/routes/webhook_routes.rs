use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::telegram::webhook::Update;
use crate::web::{AppError, AppState};

async fn telegram_webhook_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<Update>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.telegram.handle_webhook(update).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub fn create_webhook_router() -> Router<Arc<AppState>> {
    Router::new().route("/webhook", post(telegram_webhook_handler))
}
