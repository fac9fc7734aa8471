use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::web::models::PostDealRequest;
use crate::web::{AppError, AppState};

async fn post_deal_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostDealRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .telegram
        .post_deal_to_group(request.deal_id, request.group_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Scans all active platforms; partial failures still yield success,
/// matching what the dashboard expects.
async fn refresh_platforms_handler(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    state.scraper.run_all().await;
    Json(serde_json::json!({ "success": true }))
}

pub fn create_action_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/post-deal", post(post_deal_handler))
        .route("/refresh-platforms", post(refresh_platforms_handler))
}
