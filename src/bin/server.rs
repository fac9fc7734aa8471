use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dealflow_backend::config::Config;
use dealflow_backend::scheduler::SchedulerService;
use dealflow_backend::scraper::{ScraperService, TemplateDealSource};
use dealflow_backend::storage::{seed, MemStorage};
use dealflow_backend::telegram::TelegramService;
use dealflow_backend::web::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if config.telegram_bot_token.is_none() {
        warn!("TELEGRAM_BOT_TOKEN not set, deal posts will be simulated");
    }

    // The store is ephemeral; re-seed the fixed dataset on every boot.
    let storage = Arc::new(MemStorage::new());
    seed::seed(&storage).await;

    let scraper = Arc::new(ScraperService::new(
        storage.clone(),
        Arc::new(TemplateDealSource::new(config.affiliate_tracking_id.clone())),
    ));
    let telegram = Arc::new(TelegramService::new(
        storage.clone(),
        config.telegram_bot_token.clone(),
        config.owner_chat_id.clone(),
    ));

    let scheduler = Arc::new(SchedulerService::new(
        storage.clone(),
        scraper.clone(),
        telegram.clone(),
        config.post_gap,
    ));
    let scheduler_handle = scheduler.start(config.scan_interval, config.post_interval);

    let state = Arc::new(AppState {
        storage,
        scraper,
        telegram,
    });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "dealflow backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    scheduler_handle.shutdown().await;
    info!("scheduler stopped, exiting");
    Ok(())
}
