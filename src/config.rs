use std::env;
use std::time::Duration;

/// Runtime configuration, read once at startup.
///
/// The Telegram bot token and owner chat id are optional on purpose:
/// without a token every outbound post is simulated (logged and counted,
/// nothing sent). There is deliberately no fallback token in source.
#[derive(Clone)]
pub struct Config {
    pub listen_addr: String,
    pub telegram_bot_token: Option<String>,
    pub owner_chat_id: Option<String>,
    pub affiliate_tracking_id: Option<String>,
    pub scan_interval: Duration,
    pub post_interval: Duration,
    /// Pause between consecutive group posts within one cycle.
    pub post_gap: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN").ok().filter(|s| !s.is_empty());
        let owner_chat_id = env::var("OWNER_TELEGRAM_ID").ok().filter(|s| !s.is_empty());
        let affiliate_tracking_id =
            env::var("AFFILIATE_TRACKING_ID").ok().filter(|s| !s.is_empty());

        let scan_interval = Duration::from_secs(env_u64("SCAN_INTERVAL_SECS", 300));
        let post_interval = Duration::from_secs(env_u64("POST_INTERVAL_SECS", 180));
        let post_gap = Duration::from_secs(env_u64("POST_GAP_SECS", 2));

        Config {
            listen_addr,
            telegram_bot_token,
            owner_chat_id,
            affiliate_tracking_id,
            scan_interval,
            post_interval,
            post_gap,
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
