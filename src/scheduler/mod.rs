use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rand::seq::IndexedRandom;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::scraper::ScraperService;
use crate::storage::MemStorage;
use crate::telegram::TelegramService;

pub mod recurring;
pub mod tracker;

use recurring::RecurringTask;
use tracker::PostTracker;

const DEFAULT_MAX_DEALS_PER_DAY: i32 = 50;

/// Drives the periodic scan and post cycles.
pub struct SchedulerService {
    storage: Arc<MemStorage>,
    scraper: Arc<ScraperService>,
    telegram: Arc<TelegramService>,
    tracker: Mutex<PostTracker>,
    /// Pause between consecutive group posts within one cycle.
    post_gap: Duration,
}

/// Handle to the two running timers. Dropping it without calling
/// `stop` leaves the tasks running.
pub struct SchedulerHandle {
    scan: RecurringTask,
    post: RecurringTask,
}

impl SchedulerHandle {
    pub fn stop(&self) {
        self.scan.stop();
        self.post.stop();
    }

    pub async fn shutdown(self) {
        self.scan.shutdown().await;
        self.post.shutdown().await;
    }
}

impl SchedulerService {
    pub fn new(
        storage: Arc<MemStorage>,
        scraper: Arc<ScraperService>,
        telegram: Arc<TelegramService>,
        post_gap: Duration,
    ) -> Self {
        SchedulerService {
            storage,
            scraper,
            telegram,
            tracker: Mutex::new(PostTracker::new(Utc::now().date_naive())),
            post_gap,
        }
    }

    /// Spawns the scan and post timers.
    pub fn start(
        self: Arc<Self>,
        scan_interval: Duration,
        post_interval: Duration,
    ) -> SchedulerHandle {
        info!(
            scan_secs = scan_interval.as_secs(),
            post_secs = post_interval.as_secs(),
            "scheduler starting"
        );

        let scan = {
            let service = self.clone();
            RecurringTask::spawn("platform-scan", scan_interval, move || {
                let service = service.clone();
                async move { service.run_scan_cycle().await }
            })
        };

        let post = {
            let service = self;
            RecurringTask::spawn("deal-post", post_interval, move || {
                let service = service.clone();
                async move { service.run_post_cycle(Utc::now().date_naive()).await }
            })
        };

        SchedulerHandle { scan, post }
    }

    pub async fn run_scan_cycle(&self) {
        self.scraper.run_all().await;
    }

    /// One posting pass: for every active group under its daily limit,
    /// pick one active deal not yet posted to it today and send it.
    /// Per-group failures are logged and skipped.
    ///
    /// The day rollover is checked only here, so a reset after midnight
    /// waits for the next tick.
    pub async fn run_post_cycle(&self, today: NaiveDate) {
        let groups = self.storage.active_telegram_groups().await;
        let deals = self.storage.active_deals().await;
        let max_deals_per_day = self
            .storage
            .system_settings()
            .await
            .map(|s| s.max_deals_per_day)
            .unwrap_or(DEFAULT_MAX_DEALS_PER_DAY);

        if self.tracker.lock().await.roll_over(today) {
            info!(%today, "posting day rolled over, dedup set cleared");
        }

        for group in groups {
            if group.deals_posted_today >= max_deals_per_day {
                debug!(group = %group.name, "daily post limit reached, skipping");
                continue;
            }

            let picked = {
                let tracker = self.tracker.lock().await;
                let eligible: Vec<_> = deals
                    .iter()
                    .filter(|d| !tracker.is_posted(group.id, d.id))
                    .collect();
                let mut rng = rand::rng();
                eligible.choose(&mut rng).map(|d| d.id)
            };
            let Some(deal_id) = picked else {
                debug!(group = %group.name, "no eligible deals");
                continue;
            };

            match self.telegram.post_deal_to_group(deal_id, group.id).await {
                Ok(()) => {
                    self.tracker.lock().await.mark_posted(group.id, deal_id);
                }
                Err(e) => {
                    error!(group = %group.name, deal_id, error = %e, "post failed");
                    continue;
                }
            }

            tokio::time::sleep(self.post_gap).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::TemplateDealSource;
    use crate::storage::models::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn setup(max_deals_per_day: i32) -> (Arc<MemStorage>, SchedulerService) {
        let storage = Arc::new(MemStorage::new());
        storage
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
            .create_system_settings(NewSystemSettings {
                webhook_url: None,
                default_posting_interval: 30,
                max_deals_per_day,
            })
            .await;

        let scraper = Arc::new(ScraperService::new(
            storage.clone(),
            Arc::new(TemplateDealSource::new(None)),
        ));
        // No bot token: posts are simulated, counters still move.
        let telegram = Arc::new(TelegramService::new(storage.clone(), None, None));
        let scheduler = SchedulerService::new(
            storage.clone(),
            scraper,
            telegram,
            Duration::ZERO,
        );
        (storage, scheduler)
    }

    async fn one_deal(storage: &MemStorage) -> Deal {
        storage
            .create_deal(NewDeal {
                title: "Echo Dot (5th Gen)".to_string(),
                description: None,
                original_price: "5499".to_string(),
                sale_price: "3024.45".to_string(),
                discount_percentage: 45,
                product_url: "https://amazon.com/p/x".to_string(),
                affiliate_url: "https://amazon.com/p/x?tag=t".to_string(),
                image_url: None,
                category: "Smart Home".to_string(),
                platform_id: 1,
                is_active: true,
            })
            .await
    }

    async fn one_group(storage: &MemStorage) -> TelegramGroup {
        storage
            .create_telegram_group(NewTelegramGroup {
                name: "Deal Hunters".to_string(),
                chat_id: "-100123".to_string(),
                member_count: 100,
                is_active: true,
            })
            .await
    }

    #[tokio::test]
    async fn same_pair_is_not_posted_twice_in_a_day() {
        let (storage, scheduler) = setup(50).await;
        let deal = one_deal(&storage).await;
        let group = one_group(&storage).await;

        scheduler.run_post_cycle(day("2024-06-01")).await;
        scheduler.run_post_cycle(day("2024-06-01")).await;

        // Second tick was a no-op: one eligible deal, already posted.
        assert_eq!(
            storage.telegram_group(group.id).await.unwrap().deals_posted_today,
            1
        );
        assert_eq!(storage.deal(deal.id).await.unwrap().views, 1);
    }

    #[tokio::test]
    async fn day_rollover_reopens_posted_pairs() {
        let (storage, scheduler) = setup(50).await;
        let deal = one_deal(&storage).await;
        let group = one_group(&storage).await;

        scheduler.run_post_cycle(day("2024-06-01")).await;
        scheduler.run_post_cycle(day("2024-06-02")).await;

        assert_eq!(
            storage.telegram_group(group.id).await.unwrap().deals_posted_today,
            2
        );
        assert_eq!(storage.deal(deal.id).await.unwrap().views, 2);
    }

    #[tokio::test]
    async fn group_at_daily_limit_is_skipped() {
        let (storage, scheduler) = setup(50).await;
        let deal = one_deal(&storage).await;
        let group = one_group(&storage).await;
        storage
            .update_telegram_group(
                group.id,
                TelegramGroupPatch {
                    deals_posted_today: Some(50),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        scheduler.run_post_cycle(day("2024-06-01")).await;

        // No post was attempted for the saturated group.
        assert_eq!(storage.deal(deal.id).await.unwrap().views, 0);
        assert_eq!(
            storage.telegram_group(group.id).await.unwrap().deals_posted_today,
            50
        );
    }

    #[tokio::test]
    async fn inactive_groups_receive_nothing() {
        let (storage, scheduler) = setup(50).await;
        let deal = one_deal(&storage).await;
        let group = storage
            .create_telegram_group(NewTelegramGroup {
                name: "Dormant".to_string(),
                chat_id: "-100999".to_string(),
                member_count: 5,
                is_active: false,
            })
            .await;

        scheduler.run_post_cycle(day("2024-06-01")).await;

        assert_eq!(storage.deal(deal.id).await.unwrap().views, 0);
        assert_eq!(
            storage.telegram_group(group.id).await.unwrap().deals_posted_today,
            0
        );
    }

    #[tokio::test]
    async fn each_active_group_gets_its_own_post() {
        let (storage, scheduler) = setup(50).await;
        let deal = one_deal(&storage).await;
        let first = one_group(&storage).await;
        let second = storage
            .create_telegram_group(NewTelegramGroup {
                name: "Tech Deals Pro".to_string(),
                chat_id: "-100456".to_string(),
                member_count: 50,
                is_active: true,
            })
            .await;

        scheduler.run_post_cycle(day("2024-06-01")).await;

        assert_eq!(
            storage.telegram_group(first.id).await.unwrap().deals_posted_today,
            1
        );
        assert_eq!(
            storage.telegram_group(second.id).await.unwrap().deals_posted_today,
            1
        );
        // One view per group post.
        assert_eq!(storage.deal(deal.id).await.unwrap().views, 2);
    }
}
