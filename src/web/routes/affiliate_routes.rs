use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::storage::models::AffiliateProgram;
use crate::web::AppState;

async fn list_programs_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<AffiliateProgram>> {
    Json(state.storage.affiliate_programs().await)
}

pub fn create_affiliate_program_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_programs_handler))
}
