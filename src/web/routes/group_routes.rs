use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::storage::models::{NewTelegramGroup, TelegramGroup, TelegramGroupPatch};
use crate::web::{AppError, AppState};

async fn list_groups_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TelegramGroup>> {
    Json(state.storage.telegram_groups().await)
}

async fn create_group_handler(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewTelegramGroup>,
) -> (StatusCode, Json<TelegramGroup>) {
    let group = state.storage.create_telegram_group(new).await;
    (StatusCode::CREATED, Json(group))
}

async fn update_group_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<TelegramGroupPatch>,
) -> Result<Json<TelegramGroup>, AppError> {
    let group = state.storage.update_telegram_group(id, patch).await?;
    Ok(Json(group))
}

pub fn create_group_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_groups_handler).post(create_group_handler))
        .route("/{id}", axum::routing::patch(update_group_handler))
}
