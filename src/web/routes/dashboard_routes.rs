use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::storage::models::DashboardStats;
use crate::web::AppState;

async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<DashboardStats> {
    Json(state.storage.dashboard_stats().await)
}

pub fn create_dashboard_router() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(stats_handler))
}
