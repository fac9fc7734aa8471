use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::storage::models::{Deal, DealPatch, NewDeal};
use crate::web::{AppError, AppState};

async fn list_deals_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Deal>> {
    Json(state.storage.deals().await)
}

async fn active_deals_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Deal>> {
    Json(state.storage.active_deals().await)
}

async fn get_deal_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Deal>, AppError> {
    let deal = state
        .storage
        .deal(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("deal {id} not found")))?;
    Ok(Json(deal))
}

async fn create_deal_handler(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewDeal>,
) -> (StatusCode, Json<Deal>) {
    let deal = state.storage.create_deal(new).await;
    (StatusCode::CREATED, Json(deal))
}

async fn update_deal_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<DealPatch>,
) -> Result<Json<Deal>, AppError> {
    let deal = state.storage.update_deal(id, patch).await?;
    Ok(Json(deal))
}

async fn track_click_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.storage.record_deal_click(id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub fn create_deal_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_deals_handler).post(create_deal_handler))
        .route("/active", get(active_deals_handler))
        .route("/{id}", get(get_deal_handler).patch(update_deal_handler))
        .route("/{id}/click", post(track_click_handler))
}
