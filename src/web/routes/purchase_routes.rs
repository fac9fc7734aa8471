use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::storage::models::{NewPurchase, Purchase};
use crate::web::AppState;

async fn list_purchases_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Purchase>> {
    Json(state.storage.purchases().await)
}

async fn todays_purchases_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Purchase>> {
    Json(state.storage.todays_purchases().await)
}

async fn create_purchase_handler(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewPurchase>,
) -> (StatusCode, Json<Purchase>) {
    let purchase = state.storage.create_purchase(new).await;
    (StatusCode::CREATED, Json(purchase))
}

pub fn create_purchase_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_purchases_handler).post(create_purchase_handler),
        )
        .route("/today", get(todays_purchases_handler))
}
