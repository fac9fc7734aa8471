use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::storage::models::{NewDeal, Platform, PlatformPatch, PlatformStatus};
use crate::storage::MemStorage;

pub mod templates;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("platform {0} not found")]
    PlatformNotFound(i32),
    #[error("deal source failed: {0}")]
    Source(String),
}

/// Where deals come from for a given platform.
///
/// The shipped implementation synthesizes deals from static templates;
/// a real ingestion backend slots in here without touching the
/// scheduler or the API.
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn fetch(&self, platform: &Platform) -> Result<Vec<NewDeal>, ScrapeError>;
}

/// Synthesizes 1-3 deals per call from a fixed per-platform template
/// table. No network involved.
pub struct TemplateDealSource {
    tracking_id: Option<String>,
}

impl TemplateDealSource {
    pub fn new(tracking_id: Option<String>) -> Self {
        TemplateDealSource { tracking_id }
    }

    fn synthesize(&self, platform: &Platform, template: &templates::DealTemplate) -> NewDeal {
        let original: f64 = template.original_price.parse().unwrap_or(0.0);
        let sale = original * (1.0 - template.discount_percentage as f64 / 100.0);

        let product_url = format!("https://{}.com/product/{}", platform.name, slug());
        let affiliate_url = match &self.tracking_id {
            Some(tag) => format!("https://{}.com/product/{}?tag={}", platform.name, slug(), tag),
            None => format!("https://{}.com/affiliate/{}", platform.name, slug()),
        };
        let image_url = format!(
            "https://images.unsplash.com/photo-{}?w=300&h=300",
            rand::rng().random_range(0u64..1_000_000_000_000)
        );

        NewDeal {
            title: template.title.to_string(),
            description: Some(match template.description {
                Some(d) => d.to_string(),
                None => format!(
                    "Great deal on {} with {}% discount!",
                    template.title, template.discount_percentage
                ),
            }),
            original_price: template.original_price.to_string(),
            sale_price: format!("{sale:.2}"),
            discount_percentage: template.discount_percentage,
            product_url,
            affiliate_url,
            image_url: Some(image_url),
            category: template.category.to_string(),
            platform_id: platform.id,
            is_active: true,
        }
    }
}

#[async_trait]
impl DealSource for TemplateDealSource {
    async fn fetch(&self, platform: &Platform) -> Result<Vec<NewDeal>, ScrapeError> {
        let table = templates::for_platform(&platform.name);
        let mut rng = rand::rng();
        let count = rng.random_range(1..=3usize.min(table.len()));
        let picked: Vec<_> = table.choose_multiple(&mut rng, count).collect();
        Ok(picked
            .into_iter()
            .map(|template| self.synthesize(platform, template))
            .collect())
    }
}

fn slug() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Runs the deal source over platforms and persists the results.
pub struct ScraperService {
    storage: Arc<MemStorage>,
    source: Arc<dyn DealSource>,
}

impl ScraperService {
    pub fn new(storage: Arc<MemStorage>, source: Arc<dyn DealSource>) -> Self {
        ScraperService { storage, source }
    }

    /// Scans one platform and returns how many deals were stored.
    pub async fn run_platform(&self, platform_id: i32) -> Result<usize, ScrapeError> {
        let platform = self
            .storage
            .platform(platform_id)
            .await
            .ok_or(ScrapeError::PlatformNotFound(platform_id))?;

        let deals = self.source.fetch(&platform).await?;
        let count = deals.len();
        for deal in deals {
            let stored = self.storage.create_deal(deal).await;
            info!(
                platform = %platform.display_name,
                title = %stored.title,
                discount = stored.discount_percentage,
                "new deal stored"
            );
        }

        // A successful scan clears any previous error status.
        let _ = self
            .storage
            .update_platform(
                platform_id,
                PlatformPatch {
                    last_scan_at: Some(Utc::now()),
                    status: Some(PlatformStatus::Active),
                    ..Default::default()
                },
            )
            .await;

        Ok(count)
    }

    /// Scans every active platform. A failing platform is marked
    /// `error` and the rest proceed; partial failure is not surfaced
    /// to the caller.
    pub async fn run_all(&self) {
        let platforms = self.storage.platforms().await;
        let active: Vec<_> = platforms.into_iter().filter(|p| p.is_active).collect();
        info!(platforms = active.len(), "scanning active platforms");

        for platform in active {
            match self.run_platform(platform.id).await {
                Ok(count) => {
                    info!(platform = %platform.display_name, deals = count, "scan complete");
                }
                Err(e) => {
                    error!(platform = %platform.name, error = %e, "scan failed");
                    let result = self
                        .storage
                        .update_platform(
                            platform.id,
                            PlatformPatch {
                                status: Some(PlatformStatus::Error),
                                ..Default::default()
                            },
                        )
                        .await;
                    if result.is_err() {
                        warn!(platform_id = platform.id, "could not flag platform error");
                    }
                }
            }
        }
    }
}
