use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::scraper::ScraperService;
use crate::storage::MemStorage;
use crate::telegram::TelegramService;

pub mod error;
pub mod models;
pub mod routes;

pub use error::AppError;

use routes::*;

/// Everything the handlers reach for. Constructed once in the binary
/// and shared behind an `Arc`; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<MemStorage>,
    pub scraper: Arc<ScraperService>,
    pub telegram: Arc<TelegramService>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // The dashboard UI is served separately; allow it from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .nest(
            "/api/dashboard",
            dashboard_routes::create_dashboard_router(),
        )
        .nest("/api/platforms", platform_routes::create_platform_router())
        .nest("/api/deals", deal_routes::create_deal_router())
        .nest("/api/telegram-groups", group_routes::create_group_router())
        .nest("/api/purchases", purchase_routes::create_purchase_router())
        .nest("/api/scrapers", scraper_routes::create_scraper_router())
        .nest(
            "/api/affiliate-programs",
            affiliate_routes::create_affiliate_program_router(),
        )
        .nest("/api/settings", settings_routes::create_settings_router())
        .nest("/api/telegram", webhook_routes::create_webhook_router())
        .nest("/api/actions", action_routes::create_action_router())
        .with_state(state)
        .layer(cors)
}
