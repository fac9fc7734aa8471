use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::storage::models::{Deal, NewPurchase};
use crate::storage::{MemStorage, StorageError};

pub mod webhook;

use webhook::Update;

/// Referral cut applied to webhook-confirmed purchase amounts.
const COMMISSION_RATE: f64 = 0.08;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("{0} {1} not found")]
    NotFound(&'static str, i32),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("telegram api returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Formats deal posts, delivers them through the Bot API, and handles
/// incoming webhook updates.
///
/// Without a bot token every delivery is simulated: logged, skipped on
/// the wire, counters still updated. That keeps the dashboard usable in
/// development.
pub struct TelegramService {
    storage: Arc<MemStorage>,
    client: Client,
    bot_token: Option<String>,
    owner_chat_id: Option<String>,
}

impl TelegramService {
    pub fn new(
        storage: Arc<MemStorage>,
        bot_token: Option<String>,
        owner_chat_id: Option<String>,
    ) -> Self {
        TelegramService {
            storage,
            client: Client::new(),
            bot_token,
            owner_chat_id,
        }
    }

    /// Posts one deal to one group: format, deliver, record a view and
    /// bump the group's daily counter. A delivery failure propagates
    /// before any counter is touched.
    pub async fn post_deal_to_group(
        &self,
        deal_id: i32,
        group_id: i32,
    ) -> Result<(), TelegramError> {
        let deal = self
            .storage
            .deal(deal_id)
            .await
            .ok_or(TelegramError::NotFound("deal", deal_id))?;
        let group = self
            .storage
            .telegram_group(group_id)
            .await
            .ok_or(TelegramError::NotFound("telegram group", group_id))?;
        let platform = self
            .storage
            .platform(deal.platform_id)
            .await
            .ok_or(TelegramError::NotFound("platform", deal.platform_id))?;

        let message = format_deal_message(&deal, &platform.display_name);

        if self.bot_token.is_some() {
            self.send_message(&group.chat_id, &message).await?;
            info!(deal = %deal.title, group = %group.name, "deal posted");

            let savings = price(&deal.original_price) - price(&deal.sale_price);
            self.notify_owner(&format!(
                "🎯 Deal Posted!\n\n\"{}\" was automatically posted to {}\n💰 {}% OFF - Save ₹{:.0}",
                deal.title, group.name, deal.discount_percentage, savings
            ))
            .await;
        } else {
            info!(group = %group.name, "no bot token configured, simulating post");
        }

        self.storage.record_deal_view(deal_id).await?;
        self.storage.record_group_post(group_id).await?;
        Ok(())
    }

    /// One sendMessage call, no retry. Skips silently when no token is
    /// configured.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        let Some(token) = &self.bot_token else {
            debug!("no bot token configured, skipping message send");
            return Ok(());
        };

        let url = format!("https://api.telegram.org/bot{token}/sendMessage");
        let payload = SendMessagePayload {
            chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(TelegramError::Api { status, body });
        }

        debug!(chat_id, "message sent");
        Ok(())
    }

    /// Best-effort status ping to the configured owner chat.
    pub async fn notify_owner(&self, message: &str) {
        let Some(owner) = &self.owner_chat_id else {
            return;
        };
        let text = format!("🤖 AGENT UPDATE\n\n{message}");
        if let Err(e) = self.send_message(owner, &text).await {
            warn!(error = %e, "owner notification failed");
        }
    }

    /// Processes one webhook update. Unrelated or malformed updates are
    /// ignored without error.
    pub async fn handle_webhook(&self, update: Update) -> Result<(), TelegramError> {
        if let Some(message) = &update.message {
            if let Some(text) = &message.text {
                if text.contains("purchase_confirmed") {
                    self.handle_purchase_confirmation(text, message.from.as_ref())
                        .await?;
                }
            }
        }

        if let Some(callback) = &update.callback_query {
            if let Some(data) = &callback.data {
                self.handle_callback(data, callback.from.as_ref()).await;
            }
        }

        Ok(())
    }

    /// Records a purchase only when the referenced deal exists. Text
    /// that merely looks like a confirmation cannot invent revenue for
    /// unknown deals.
    async fn handle_purchase_confirmation(
        &self,
        text: &str,
        from: Option<&webhook::TelegramUser>,
    ) -> Result<(), TelegramError> {
        let Some(parsed) = webhook::parse_purchase_confirmation(text) else {
            warn!("unparseable purchase confirmation ignored");
            return Ok(());
        };

        if self.storage.deal(parsed.deal_id).await.is_none() {
            warn!(deal_id = parsed.deal_id, "purchase for unknown deal ignored");
            return Ok(());
        }

        let amount: f64 = parsed.amount.parse().unwrap_or(0.0);
        let commission = amount * COMMISSION_RATE;

        let user_id = from
            .map(|u| u.id.to_string())
            .or(parsed.user_id);
        let username = from.and_then(|u| u.username.clone());

        let purchase = self
            .storage
            .create_purchase(NewPurchase {
                deal_id: parsed.deal_id,
                telegram_group_id: None,
                user_id,
                username,
                amount: parsed.amount.clone(),
                commission: format!("{commission:.2}"),
            })
            .await;

        info!(
            purchase_id = purchase.id,
            deal_id = purchase.deal_id,
            amount = %purchase.amount,
            "purchase tracked"
        );
        Ok(())
    }

    async fn handle_callback(&self, data: &str, from: Option<&webhook::TelegramUser>) {
        let Some(deal_id) = webhook::parse_deal_callback(data) else {
            return;
        };
        match self.storage.record_deal_click(deal_id).await {
            Ok(deal) => {
                let username = from
                    .and_then(|u| u.username.as_deref())
                    .unwrap_or("unknown");
                info!(username, deal = %deal.title, "deal click tracked");
            }
            Err(e) => error!(deal_id, error = %e, "click tracking failed"),
        }
    }
}

/// Renders the group post for a deal. Markdown, matching what the
/// dashboard previews.
pub fn format_deal_message(deal: &Deal, platform_name: &str) -> String {
    let savings = price(&deal.original_price) - price(&deal.sale_price);
    let description = deal.description.as_deref().unwrap_or("");

    format!(
        "🔥 *HOT DEAL ALERT* 🔥\n\n\
         📱 *{title}*\n\n\
         💰 *Price:* ₹{sale} (was ₹{original})\n\
         💸 *You Save:* ₹{savings:.0} ({discount}% OFF)\n\
         🏪 *Platform:* {platform}\n\
         📦 *Category:* {category}\n\n\
         {description}\n\n\
         🛒 *Buy Now:* {url}\n\n\
         ⚡ Limited time offer! Grab it before it's gone!\n\n\
         #Deal #{platform} #{category}",
        title = deal.title,
        sale = deal.sale_price,
        original = deal.original_price,
        savings = savings,
        discount = deal.discount_percentage,
        platform = platform_name,
        category = deal.category,
        description = description,
        url = deal.affiliate_url,
    )
}

fn price(value: &str) -> f64 {
    value.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{NewDeal, NewPlatform, NewTelegramGroup, PlatformStatus};
    use chrono::Utc;

    fn service(storage: Arc<MemStorage>) -> TelegramService {
        // No token: delivery is simulated, nothing leaves the process.
        TelegramService::new(storage, None, None)
    }

    async fn seed_deal(storage: &MemStorage) -> Deal {
        let platform = storage
            .create_platform(NewPlatform {
                name: "amazon".to_string(),
                display_name: "Amazon".to_string(),
                icon: String::new(),
                color: String::new(),
                is_active: true,
                status: PlatformStatus::Active,
            })
            .await;
        storage
            .create_deal(NewDeal {
                title: "Echo Dot (5th Gen)".to_string(),
                description: Some("Smart speaker".to_string()),
                original_price: "5499".to_string(),
                sale_price: "3024.45".to_string(),
                discount_percentage: 45,
                product_url: "https://amazon.com/p/x".to_string(),
                affiliate_url: "https://amazon.com/p/x?tag=t".to_string(),
                image_url: None,
                category: "Smart Home".to_string(),
                platform_id: platform.id,
                is_active: true,
            })
            .await
    }

    #[tokio::test]
    async fn message_contains_price_savings_and_link() {
        let storage = MemStorage::new();
        let deal = seed_deal(&storage).await;

        let message = format_deal_message(&deal, "Amazon");
        assert!(message.contains("Echo Dot (5th Gen)"));
        assert!(message.contains("₹3024.45 (was ₹5499)"));
        // 5499 - 3024.45 rounds to 2475 whole rupees.
        assert!(message.contains("You Save:* ₹2475 (45% OFF)"));
        assert!(message.contains("https://amazon.com/p/x?tag=t"));
        assert!(message.contains("#Deal #Amazon #Smart Home"));
    }

    #[tokio::test]
    async fn simulated_post_still_updates_counters() {
        let storage = Arc::new(MemStorage::new());
        let deal = seed_deal(&storage).await;
        let group = storage
            .create_telegram_group(NewTelegramGroup {
                name: "Deal Hunters".to_string(),
                chat_id: "-100123".to_string(),
                member_count: 10,
                is_active: true,
            })
            .await;

        let svc = service(storage.clone());
        svc.post_deal_to_group(deal.id, group.id).await.unwrap();

        assert_eq!(storage.deal(deal.id).await.unwrap().views, 1);
        let group = storage.telegram_group(group.id).await.unwrap();
        assert_eq!(group.deals_posted_today, 1);
        assert!(group.last_post_at.is_some());
        assert!(group.last_post_at.unwrap() <= Utc::now());
    }

    #[tokio::test]
    async fn post_unknown_deal_fails() {
        let storage = Arc::new(MemStorage::new());
        let svc = service(storage);
        let err = svc.post_deal_to_group(9, 1).await.unwrap_err();
        assert!(matches!(err, TelegramError::NotFound("deal", 9)));
    }

    #[tokio::test]
    async fn webhook_purchase_records_eight_percent_commission() {
        let storage = Arc::new(MemStorage::new());
        let deal = seed_deal(&storage).await;
        let svc = service(storage.clone());

        let update: Update = serde_json::from_value(serde_json::json!({
            "message": {
                "text": format!("purchase_confirmed deal_id:{} amount:1000", deal.id),
                "from": { "id": 123456789i64, "username": "john_doe" }
            }
        }))
        .unwrap();
        svc.handle_webhook(update).await.unwrap();

        let purchases = storage.purchases().await;
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].deal_id, deal.id);
        assert_eq!(purchases[0].commission, "80.00");
        assert_eq!(purchases[0].user_id.as_deref(), Some("123456789"));
        assert_eq!(purchases[0].username.as_deref(), Some("john_doe"));
    }

    #[tokio::test]
    async fn webhook_purchase_for_unknown_deal_is_ignored() {
        let storage = Arc::new(MemStorage::new());
        let svc = service(storage.clone());

        let update: Update = serde_json::from_value(serde_json::json!({
            "message": {
                "text": "purchase_confirmed deal_id:999 amount:1000",
                "from": { "id": 1i64 }
            }
        }))
        .unwrap();
        svc.handle_webhook(update).await.unwrap();

        assert!(storage.purchases().await.is_empty());
    }

    #[tokio::test]
    async fn webhook_callback_tracks_click() {
        let storage = Arc::new(MemStorage::new());
        let deal = seed_deal(&storage).await;
        let svc = service(storage.clone());

        let update: Update = serde_json::from_value(serde_json::json!({
            "callback_query": {
                "data": format!("deal_{}", deal.id),
                "from": { "id": 5i64, "username": "clicker" }
            }
        }))
        .unwrap();
        svc.handle_webhook(update).await.unwrap();

        assert_eq!(storage.deal(deal.id).await.unwrap().clicks, 1);
    }
}
