use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::storage::models::{SystemSettings, SystemSettingsPatch};
use crate::web::{AppError, AppState};

/// The settings singleton; `null` until seeded.
async fn get_settings_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Option<SystemSettings>> {
    Json(state.storage.system_settings().await)
}

async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<SystemSettingsPatch>,
) -> Result<Json<SystemSettings>, AppError> {
    let settings = state.storage.update_system_settings(id, patch).await?;
    Ok(Json(settings))
}

pub fn create_settings_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_settings_handler))
        .route("/{id}", axum::routing::patch(update_settings_handler))
}
