use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::storage::models::{Platform, PlatformPatch};
use crate::web::{AppError, AppState};

async fn list_platforms_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Platform>> {
    Json(state.storage.platforms().await)
}

async fn get_platform_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Platform>, AppError> {
    let platform = state
        .storage
        .platform(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("platform {id} not found")))?;
    Ok(Json(platform))
}

async fn update_platform_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<PlatformPatch>,
) -> Result<Json<Platform>, AppError> {
    let platform = state.storage.update_platform(id, patch).await?;
    Ok(Json(platform))
}

pub fn create_platform_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_platforms_handler))
        .route(
            "/{id}",
            get(get_platform_handler).patch(update_platform_handler),
        )
}
