use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;

use super::models::*;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0} {1} not found")]
    NotFound(&'static str, i32),
    #[error("system settings not initialized")]
    SettingsMissing,
}

#[derive(Default)]
struct Tables {
    platforms: HashMap<i32, Platform>,
    deals: HashMap<i32, Deal>,
    telegram_groups: HashMap<i32, TelegramGroup>,
    purchases: HashMap<i32, Purchase>,
    scraper_configs: HashMap<i32, ScraperConfig>,
    affiliate_programs: HashMap<i32, AffiliateProgram>,
    system_settings: Option<SystemSettings>,

    next_platform_id: i32,
    next_deal_id: i32,
    next_group_id: i32,
    next_purchase_id: i32,
    next_scraper_config_id: i32,
    next_affiliate_program_id: i32,
    next_settings_id: i32,
}

impl Tables {
    fn new() -> Self {
        Tables {
            next_platform_id: 1,
            next_deal_id: 1,
            next_group_id: 1,
            next_purchase_id: 1,
            next_scraper_config_id: 1,
            next_affiliate_program_id: 1,
            next_settings_id: 1,
            ..Default::default()
        }
    }
}

/// In-memory keyed collections behind one async mutex.
///
/// All state is process-local and lost on restart; the binary re-seeds
/// a fixed dataset at startup. Updates are shallow merges,
/// last-write-wins, no concurrency check beyond the lock itself.
pub struct MemStorage {
    inner: Mutex<Tables>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage {
            inner: Mutex::new(Tables::new()),
        }
    }

    // --- Platforms ---

    pub async fn platforms(&self) -> Vec<Platform> {
        let mut list: Vec<_> = self.inner.lock().await.platforms.values().cloned().collect();
        list.sort_by_key(|p| p.id);
        list
    }

    pub async fn platform(&self, id: i32) -> Option<Platform> {
        self.inner.lock().await.platforms.get(&id).cloned()
    }

    pub async fn create_platform(&self, new: NewPlatform) -> Platform {
        let mut t = self.inner.lock().await;
        let id = t.next_platform_id;
        t.next_platform_id += 1;
        let platform = Platform {
            id,
            name: new.name,
            display_name: new.display_name,
            icon: new.icon,
            color: new.color,
            is_active: new.is_active,
            last_scan_at: None,
            status: new.status,
        };
        t.platforms.insert(id, platform.clone());
        platform
    }

    pub async fn update_platform(
        &self,
        id: i32,
        patch: PlatformPatch,
    ) -> Result<Platform, StorageError> {
        let mut t = self.inner.lock().await;
        let platform = t
            .platforms
            .get_mut(&id)
            .ok_or(StorageError::NotFound("platform", id))?;
        if let Some(v) = patch.display_name {
            platform.display_name = v;
        }
        if let Some(v) = patch.icon {
            platform.icon = v;
        }
        if let Some(v) = patch.color {
            platform.color = v;
        }
        if let Some(v) = patch.is_active {
            platform.is_active = v;
        }
        if let Some(v) = patch.last_scan_at {
            platform.last_scan_at = Some(v);
        }
        if let Some(v) = patch.status {
            platform.status = v;
        }
        Ok(platform.clone())
    }

    // --- Deals ---

    /// All deals, newest first.
    pub async fn deals(&self) -> Vec<Deal> {
        let mut list: Vec<_> = self.inner.lock().await.deals.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    pub async fn deal(&self, id: i32) -> Option<Deal> {
        self.inner.lock().await.deals.get(&id).cloned()
    }

    pub async fn create_deal(&self, new: NewDeal) -> Deal {
        let mut t = self.inner.lock().await;
        let id = t.next_deal_id;
        t.next_deal_id += 1;
        let deal = Deal {
            id,
            title: new.title,
            description: new.description,
            original_price: new.original_price,
            sale_price: new.sale_price,
            discount_percentage: new.discount_percentage,
            product_url: new.product_url,
            affiliate_url: new.affiliate_url,
            image_url: new.image_url,
            category: new.category,
            platform_id: new.platform_id,
            is_active: new.is_active,
            views: 0,
            clicks: 0,
            conversions: 0,
            created_at: Utc::now(),
        };
        t.deals.insert(id, deal.clone());
        deal
    }

    pub async fn update_deal(&self, id: i32, patch: DealPatch) -> Result<Deal, StorageError> {
        let mut t = self.inner.lock().await;
        let deal = t
            .deals
            .get_mut(&id)
            .ok_or(StorageError::NotFound("deal", id))?;
        if let Some(v) = patch.title {
            deal.title = v;
        }
        if let Some(v) = patch.description {
            deal.description = Some(v);
        }
        if let Some(v) = patch.original_price {
            deal.original_price = v;
        }
        if let Some(v) = patch.sale_price {
            deal.sale_price = v;
        }
        if let Some(v) = patch.discount_percentage {
            deal.discount_percentage = v;
        }
        if let Some(v) = patch.image_url {
            deal.image_url = Some(v);
        }
        if let Some(v) = patch.category {
            deal.category = v;
        }
        if let Some(v) = patch.is_active {
            deal.is_active = v;
        }
        if let Some(v) = patch.conversions {
            deal.conversions = v;
        }
        Ok(deal.clone())
    }

    pub async fn active_deals(&self) -> Vec<Deal> {
        self.inner
            .lock()
            .await
            .deals
            .values()
            .filter(|d| d.is_active)
            .cloned()
            .collect()
    }

    pub async fn deals_by_platform(&self, platform_id: i32) -> Vec<Deal> {
        self.inner
            .lock()
            .await
            .deals
            .values()
            .filter(|d| d.platform_id == platform_id)
            .cloned()
            .collect()
    }

    pub async fn record_deal_click(&self, id: i32) -> Result<Deal, StorageError> {
        let mut t = self.inner.lock().await;
        let deal = t
            .deals
            .get_mut(&id)
            .ok_or(StorageError::NotFound("deal", id))?;
        deal.clicks += 1;
        Ok(deal.clone())
    }

    pub async fn record_deal_view(&self, id: i32) -> Result<Deal, StorageError> {
        let mut t = self.inner.lock().await;
        let deal = t
            .deals
            .get_mut(&id)
            .ok_or(StorageError::NotFound("deal", id))?;
        deal.views += 1;
        Ok(deal.clone())
    }

    // --- Telegram groups ---

    pub async fn telegram_groups(&self) -> Vec<TelegramGroup> {
        let mut list: Vec<_> = self
            .inner
            .lock()
            .await
            .telegram_groups
            .values()
            .cloned()
            .collect();
        list.sort_by_key(|g| g.id);
        list
    }

    pub async fn telegram_group(&self, id: i32) -> Option<TelegramGroup> {
        self.inner.lock().await.telegram_groups.get(&id).cloned()
    }

    pub async fn create_telegram_group(&self, new: NewTelegramGroup) -> TelegramGroup {
        let mut t = self.inner.lock().await;
        let id = t.next_group_id;
        t.next_group_id += 1;
        let group = TelegramGroup {
            id,
            name: new.name,
            chat_id: new.chat_id,
            member_count: new.member_count,
            is_active: new.is_active,
            deals_posted_today: 0,
            last_post_at: None,
        };
        t.telegram_groups.insert(id, group.clone());
        group
    }

    pub async fn update_telegram_group(
        &self,
        id: i32,
        patch: TelegramGroupPatch,
    ) -> Result<TelegramGroup, StorageError> {
        let mut t = self.inner.lock().await;
        let group = t
            .telegram_groups
            .get_mut(&id)
            .ok_or(StorageError::NotFound("telegram group", id))?;
        if let Some(v) = patch.name {
            group.name = v;
        }
        if let Some(v) = patch.member_count {
            group.member_count = v;
        }
        if let Some(v) = patch.is_active {
            group.is_active = v;
        }
        if let Some(v) = patch.deals_posted_today {
            group.deals_posted_today = v;
        }
        if let Some(v) = patch.last_post_at {
            group.last_post_at = Some(v);
        }
        Ok(group.clone())
    }

    pub async fn active_telegram_groups(&self) -> Vec<TelegramGroup> {
        self.inner
            .lock()
            .await
            .telegram_groups
            .values()
            .filter(|g| g.is_active)
            .cloned()
            .collect()
    }

    /// Bumps the daily post counter and last-post timestamp in one step.
    pub async fn record_group_post(&self, id: i32) -> Result<TelegramGroup, StorageError> {
        let mut t = self.inner.lock().await;
        let group = t
            .telegram_groups
            .get_mut(&id)
            .ok_or(StorageError::NotFound("telegram group", id))?;
        group.deals_posted_today += 1;
        group.last_post_at = Some(Utc::now());
        Ok(group.clone())
    }

    // --- Purchases ---

    pub async fn purchases(&self) -> Vec<Purchase> {
        let mut list: Vec<_> = self.inner.lock().await.purchases.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    pub async fn create_purchase(&self, new: NewPurchase) -> Purchase {
        let mut t = self.inner.lock().await;
        let id = t.next_purchase_id;
        t.next_purchase_id += 1;
        let purchase = Purchase {
            id,
            deal_id: new.deal_id,
            telegram_group_id: new.telegram_group_id,
            user_id: new.user_id,
            username: new.username,
            amount: new.amount,
            commission: new.commission,
            created_at: Utc::now(),
        };
        t.purchases.insert(id, purchase.clone());
        purchase
    }

    pub async fn purchases_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Purchase> {
        self.inner
            .lock()
            .await
            .purchases
            .values()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .cloned()
            .collect()
    }

    pub async fn todays_purchases(&self) -> Vec<Purchase> {
        let (start, end) = today_bounds();
        self.purchases_between(start, end).await
    }

    // --- Scraper configs ---

    pub async fn scraper_configs(&self) -> Vec<ScraperConfig> {
        let mut list: Vec<_> = self
            .inner
            .lock()
            .await
            .scraper_configs
            .values()
            .cloned()
            .collect();
        list.sort_by_key(|c| c.id);
        list
    }

    pub async fn scraper_config(&self, id: i32) -> Option<ScraperConfig> {
        self.inner.lock().await.scraper_configs.get(&id).cloned()
    }

    pub async fn create_scraper_config(&self, new: NewScraperConfig) -> ScraperConfig {
        let mut t = self.inner.lock().await;
        let id = t.next_scraper_config_id;
        t.next_scraper_config_id += 1;
        let config = ScraperConfig {
            id,
            platform_id: new.platform_id,
            is_enabled: new.is_enabled,
            frequency_minutes: new.frequency_minutes,
            last_run: None,
            next_run: None,
        };
        t.scraper_configs.insert(id, config.clone());
        config
    }

    pub async fn update_scraper_config(
        &self,
        id: i32,
        patch: ScraperConfigPatch,
    ) -> Result<ScraperConfig, StorageError> {
        let mut t = self.inner.lock().await;
        let config = t
            .scraper_configs
            .get_mut(&id)
            .ok_or(StorageError::NotFound("scraper config", id))?;
        if let Some(v) = patch.is_enabled {
            config.is_enabled = v;
        }
        if let Some(v) = patch.frequency_minutes {
            config.frequency_minutes = v;
        }
        if let Some(v) = patch.last_run {
            config.last_run = Some(v);
        }
        if let Some(v) = patch.next_run {
            config.next_run = Some(v);
        }
        Ok(config.clone())
    }

    // --- Affiliate programs ---

    pub async fn affiliate_programs(&self) -> Vec<AffiliateProgram> {
        let mut list: Vec<_> = self
            .inner
            .lock()
            .await
            .affiliate_programs
            .values()
            .cloned()
            .collect();
        list.sort_by_key(|p| p.id);
        list
    }

    pub async fn affiliate_program_by_platform(
        &self,
        platform_id: i32,
    ) -> Option<AffiliateProgram> {
        self.inner
            .lock()
            .await
            .affiliate_programs
            .values()
            .find(|p| p.platform_id == platform_id)
            .cloned()
    }

    pub async fn create_affiliate_program(&self, new: NewAffiliateProgram) -> AffiliateProgram {
        let mut t = self.inner.lock().await;
        let id = t.next_affiliate_program_id;
        t.next_affiliate_program_id += 1;
        let program = AffiliateProgram {
            id,
            platform_id: new.platform_id,
            program_name: new.program_name,
            tracking_id: new.tracking_id,
            commission_rate: new.commission_rate,
            is_active: new.is_active,
        };
        t.affiliate_programs.insert(id, program.clone());
        program
    }

    // --- System settings ---

    pub async fn system_settings(&self) -> Option<SystemSettings> {
        self.inner.lock().await.system_settings.clone()
    }

    pub async fn create_system_settings(&self, new: NewSystemSettings) -> SystemSettings {
        let mut t = self.inner.lock().await;
        let id = t.next_settings_id;
        t.next_settings_id += 1;
        let settings = SystemSettings {
            id,
            webhook_url: new.webhook_url,
            default_posting_interval: new.default_posting_interval,
            max_deals_per_day: new.max_deals_per_day,
        };
        t.system_settings = Some(settings.clone());
        settings
    }

    pub async fn update_system_settings(
        &self,
        id: i32,
        patch: SystemSettingsPatch,
    ) -> Result<SystemSettings, StorageError> {
        let mut t = self.inner.lock().await;
        let settings = match t.system_settings.as_mut() {
            Some(s) if s.id == id => s,
            Some(_) => return Err(StorageError::NotFound("system settings", id)),
            None => return Err(StorageError::SettingsMissing),
        };
        if let Some(v) = patch.webhook_url {
            settings.webhook_url = Some(v);
        }
        if let Some(v) = patch.default_posting_interval {
            settings.default_posting_interval = v;
        }
        if let Some(v) = patch.max_deals_per_day {
            settings.max_deals_per_day = v;
        }
        Ok(settings.clone())
    }

    // --- Aggregates ---

    /// Full-collection scan; fine for a small ephemeral dataset.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        let t = self.inner.lock().await;

        let active_deals = t.deals.values().filter(|d| d.is_active).count();
        let telegram_groups = t.telegram_groups.len();

        let (start, end) = today_bounds();
        let today_revenue: f64 = t
            .purchases
            .values()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .filter_map(|p| p.commission.parse::<f64>().ok())
            .sum();

        let total_views: i64 = t.deals.values().map(|d| d.views as i64).sum();
        let total_clicks: i64 = t.deals.values().map(|d| d.clicks as i64).sum();

        let click_through_rate = if total_views > 0 {
            (total_clicks as f64 / total_views as f64) * 100.0
        } else {
            0.0
        };

        DashboardStats {
            active_deals,
            today_revenue,
            click_through_rate,
            telegram_groups,
            today_clicks: total_clicks,
            today_views: total_views,
        }
    }
}

fn today_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Utc::now().date_naive();
    let start = today.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end = start + chrono::Duration::days(1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deal(platform_id: i32) -> NewDeal {
        NewDeal {
            title: "Wireless Bluetooth Headphones".to_string(),
            description: Some("Noise cancelling over-ear".to_string()),
            original_price: "3999".to_string(),
            sale_price: "1999.50".to_string(),
            discount_percentage: 50,
            product_url: "https://amazon.com/product/abc".to_string(),
            affiliate_url: "https://amazon.com/product/abc?tag=t".to_string(),
            image_url: None,
            category: "Electronics".to_string(),
            platform_id,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn click_counter_increments_exactly() {
        let storage = MemStorage::new();
        let deal = storage.create_deal(sample_deal(1)).await;
        assert_eq!(deal.clicks, 0);

        for _ in 0..5 {
            storage.record_deal_click(deal.id).await.unwrap();
        }
        assert_eq!(storage.deal(deal.id).await.unwrap().clicks, 5);
    }

    #[tokio::test]
    async fn update_is_a_shallow_merge() {
        let storage = MemStorage::new();
        let deal = storage.create_deal(sample_deal(1)).await;

        let updated = storage
            .update_deal(
                deal.id,
                DealPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!updated.is_active);
        // Untouched fields survive the merge.
        assert_eq!(updated.title, deal.title);
        assert_eq!(updated.sale_price, deal.sale_price);
    }

    #[tokio::test]
    async fn update_missing_deal_is_not_found() {
        let storage = MemStorage::new();
        let err = storage
            .update_deal(99, DealPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound("deal", 99)));
    }

    #[tokio::test]
    async fn ctr_is_zero_without_views() {
        let storage = MemStorage::new();
        storage.create_deal(sample_deal(1)).await;

        let stats = storage.dashboard_stats().await;
        assert_eq!(stats.today_views, 0);
        assert_eq!(stats.click_through_rate, 0.0);
    }

    #[tokio::test]
    async fn ctr_uses_totals_across_deals() {
        let storage = MemStorage::new();
        let a = storage.create_deal(sample_deal(1)).await;
        storage.create_deal(sample_deal(2)).await;

        // 10 views and 3 clicks on one deal, nothing on the other.
        for _ in 0..10 {
            storage.record_deal_view(a.id).await.unwrap();
        }
        for _ in 0..3 {
            storage.record_deal_click(a.id).await.unwrap();
        }

        let stats = storage.dashboard_stats().await;
        assert_eq!(stats.today_views, 10);
        assert_eq!(stats.today_clicks, 3);
        assert!((stats.click_through_rate - 30.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn todays_purchases_feed_revenue() {
        let storage = MemStorage::new();
        storage
            .create_purchase(NewPurchase {
                deal_id: 1,
                telegram_group_id: Some(1),
                user_id: Some("123".to_string()),
                username: Some("john_doe".to_string()),
                amount: "1999".to_string(),
                commission: "120".to_string(),
            })
            .await;
        storage
            .create_purchase(NewPurchase {
                deal_id: 2,
                telegram_group_id: None,
                user_id: None,
                username: None,
                amount: "850".to_string(),
                commission: "68".to_string(),
            })
            .await;

        assert_eq!(storage.todays_purchases().await.len(), 2);
        let stats = storage.dashboard_stats().await;
        assert!((stats.today_revenue - 188.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn settings_singleton_round_trip() {
        let storage = MemStorage::new();
        assert!(storage.system_settings().await.is_none());

        let settings = storage
            .create_system_settings(NewSystemSettings {
                webhook_url: None,
                default_posting_interval: 30,
                max_deals_per_day: 50,
            })
            .await;

        let updated = storage
            .update_system_settings(
                settings.id,
                SystemSettingsPatch {
                    max_deals_per_day: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.max_deals_per_day, 10);
        assert_eq!(updated.default_posting_interval, 30);
    }
}
