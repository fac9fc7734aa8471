use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::storage::models::ScraperConfig;
use crate::web::models::RunScraperRequest;
use crate::web::{AppError, AppState};

/// Scans one platform when a platform id is given, otherwise all
/// active platforms (partial failures are not reported).
async fn run_scraper_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunScraperRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    match request.platform_id {
        Some(platform_id) => {
            state.scraper.run_platform(platform_id).await?;
        }
        None => state.scraper.run_all().await,
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn list_configs_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ScraperConfig>> {
    Json(state.storage.scraper_configs().await)
}

pub fn create_scraper_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/run", post(run_scraper_handler))
        .route("/configs", get(list_configs_handler))
}
