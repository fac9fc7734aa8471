use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scan health of a source platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStatus {
    Active,
    Paused,
    Error,
    RateLimited,
}

/// A named source feed (marketplace) deals are generated against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: i32,
    /// Internal key, e.g. "amazon". Selects the template table.
    pub name: String,
    pub display_name: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub last_scan_at: Option<DateTime<Utc>>,
    pub status: PlatformStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlatform {
    pub name: String,
    pub display_name: String,
    pub icon: String,
    pub color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_platform_status")]
    pub status: PlatformStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPatch {
    pub display_name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
    pub last_scan_at: Option<DateTime<Utc>>,
    pub status: Option<PlatformStatus>,
}

/// A synthesized product offer with pricing and discount metadata.
///
/// Prices are decimal strings with two fractional digits where derived,
/// matching the JSON shape the dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub original_price: String,
    pub sale_price: String,
    pub discount_percentage: i32,
    pub product_url: String,
    pub affiliate_url: String,
    pub image_url: Option<String>,
    pub category: String,
    pub platform_id: i32,
    pub is_active: bool,
    pub views: i32,
    pub clicks: i32,
    pub conversions: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub title: String,
    pub description: Option<String>,
    pub original_price: String,
    pub sale_price: String,
    pub discount_percentage: i32,
    pub product_url: String,
    pub affiliate_url: String,
    pub image_url: Option<String>,
    pub category: String,
    pub platform_id: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<String>,
    pub sale_price: Option<String>,
    pub discount_percentage: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub conversions: Option<i32>,
}

/// A destination chat formatted deal messages are posted to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramGroup {
    pub id: i32,
    pub name: String,
    pub chat_id: String,
    pub member_count: i32,
    pub is_active: bool,
    pub deals_posted_today: i32,
    pub last_post_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTelegramGroup {
    pub name: String,
    pub chat_id: String,
    #[serde(default)]
    pub member_count: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramGroupPatch {
    pub name: Option<String>,
    pub member_count: Option<i32>,
    pub is_active: Option<bool>,
    pub deals_posted_today: Option<i32>,
    pub last_post_at: Option<DateTime<Utc>>,
}

/// A purchase attributed to a posted deal. Amount and commission are
/// decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i32,
    pub deal_id: i32,
    pub telegram_group_id: Option<i32>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub amount: String,
    pub commission: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub deal_id: i32,
    pub telegram_group_id: Option<i32>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub amount: String,
    pub commission: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperConfig {
    pub id: i32,
    pub platform_id: i32,
    pub is_enabled: bool,
    pub frequency_minutes: i32,
    pub last_run: Option<DateTime<Utc>>,
    pub next_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScraperConfig {
    pub platform_id: i32,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default = "default_frequency")]
    pub frequency_minutes: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperConfigPatch {
    pub is_enabled: Option<bool>,
    pub frequency_minutes: Option<i32>,
    pub last_run: Option<DateTime<Utc>>,
    pub next_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateProgram {
    pub id: i32,
    pub platform_id: i32,
    pub program_name: String,
    pub tracking_id: Option<String>,
    /// Percentage, decimal string (e.g. "8.00").
    pub commission_rate: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAffiliateProgram {
    pub platform_id: i32,
    pub program_name: String,
    pub tracking_id: Option<String>,
    pub commission_rate: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Process-wide singleton settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub id: i32,
    pub webhook_url: Option<String>,
    /// Minutes.
    pub default_posting_interval: i32,
    pub max_deals_per_day: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSystemSettings {
    pub webhook_url: Option<String>,
    #[serde(default = "default_posting_interval")]
    pub default_posting_interval: i32,
    #[serde(default = "default_max_deals")]
    pub max_deals_per_day: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettingsPatch {
    pub webhook_url: Option<String>,
    pub default_posting_interval: Option<i32>,
    pub max_deals_per_day: Option<i32>,
}

/// Aggregates scanned on demand for the dashboard header cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_deals: usize,
    pub today_revenue: f64,
    pub click_through_rate: f64,
    pub telegram_groups: usize,
    pub today_clicks: i64,
    pub today_views: i64,
}

fn default_true() -> bool {
    true
}

fn default_platform_status() -> PlatformStatus {
    PlatformStatus::Active
}

fn default_frequency() -> i32 {
    60
}

fn default_posting_interval() -> i32 {
    30
}

fn default_max_deals() -> i32 {
    50
}
