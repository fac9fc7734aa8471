use super::memory::MemStorage;
use super::models::*;

/// Loads the fixed startup dataset. The store is ephemeral, so this runs
/// on every boot.
pub async fn seed(storage: &MemStorage) {
    let platforms = [
        ("amazon", "Amazon", "fab fa-amazon", "orange-600", PlatformStatus::Active),
        ("flipkart", "Flipkart", "fas fa-shopping-cart", "blue-600", PlatformStatus::Active),
        ("zepto", "Zepto", "fas fa-bolt", "purple-600", PlatformStatus::Active),
        ("swiggy", "Swiggy", "fas fa-utensils", "orange-600", PlatformStatus::RateLimited),
        ("zomato", "Zomato", "fas fa-concierge-bell", "red-600", PlatformStatus::Active),
        ("ajio", "Ajio", "fas fa-tshirt", "pink-600", PlatformStatus::Active),
    ];
    for (name, display_name, icon, color, status) in platforms {
        let platform = storage
            .create_platform(NewPlatform {
                name: name.to_string(),
                display_name: display_name.to_string(),
                icon: icon.to_string(),
                color: color.to_string(),
                is_active: true,
                status,
            })
            .await;
        storage
            .create_scraper_config(NewScraperConfig {
                platform_id: platform.id,
                is_enabled: true,
                frequency_minutes: 60,
            })
            .await;
    }

    let groups = [
        ("Deal Hunters India", "-1001234567890", 2300, true),
        ("Tech Deals Pro", "-1001234567891", 1800, true),
        ("Fashion Deals Central", "-1001234567892", 950, false),
    ];
    for (name, chat_id, member_count, is_active) in groups {
        storage
            .create_telegram_group(NewTelegramGroup {
                name: name.to_string(),
                chat_id: chat_id.to_string(),
                member_count,
                is_active,
            })
            .await;
    }

    let deals = [
        NewDeal {
            title: "Wireless Bluetooth Headphones".to_string(),
            description: Some(
                "Premium quality wireless headphones with noise cancellation".to_string(),
            ),
            original_price: "3999".to_string(),
            sale_price: "1999".to_string(),
            discount_percentage: 50,
            product_url: "https://amazon.in/product/123".to_string(),
            affiliate_url: "https://amazon.in/affiliate/123".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=300&h=300"
                    .to_string(),
            ),
            category: "Electronics".to_string(),
            platform_id: 1,
            is_active: true,
        },
        NewDeal {
            title: "Samsung Galaxy S23 Ultra".to_string(),
            description: Some("Latest flagship smartphone with advanced camera".to_string()),
            original_price: "124999".to_string(),
            sale_price: "89999".to_string(),
            discount_percentage: 28,
            product_url: "https://flipkart.com/product/456".to_string(),
            affiliate_url: "https://flipkart.com/affiliate/456".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=300&h=300"
                    .to_string(),
            ),
            category: "Mobile".to_string(),
            platform_id: 2,
            is_active: true,
        },
        NewDeal {
            title: "Designer Leather Jacket".to_string(),
            description: Some("Premium leather jacket for men".to_string()),
            original_price: "8999".to_string(),
            sale_price: "4499".to_string(),
            discount_percentage: 50,
            product_url: "https://ajio.com/product/789".to_string(),
            affiliate_url: "https://ajio.com/affiliate/789".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1562157873-818bc0726f68?w=300&h=300"
                    .to_string(),
            ),
            category: "Fashion".to_string(),
            platform_id: 6,
            is_active: true,
        },
    ];
    for deal in deals {
        storage.create_deal(deal).await;
    }

    let purchases = [
        (1, Some(1), "123456789", "john_doe", "1999", "120"),
        (3, Some(3), "987654321", "fashionista", "4499", "315"),
        (1, Some(2), "456789123", "coffee_lover", "850", "68"),
    ];
    for (deal_id, group_id, user_id, username, amount, commission) in purchases {
        storage
            .create_purchase(NewPurchase {
                deal_id,
                telegram_group_id: group_id,
                user_id: Some(user_id.to_string()),
                username: Some(username.to_string()),
                amount: amount.to_string(),
                commission: commission.to_string(),
            })
            .await;
    }

    let programs = [
        (1, "Amazon Associates", "8.00"),
        (2, "Flipkart Affiliate", "6.50"),
    ];
    for (platform_id, program_name, commission_rate) in programs {
        storage
            .create_affiliate_program(NewAffiliateProgram {
                platform_id,
                program_name: program_name.to_string(),
                tracking_id: None,
                commission_rate: commission_rate.to_string(),
                is_active: true,
            })
            .await;
    }

    storage
        .create_system_settings(NewSystemSettings {
            webhook_url: None,
            default_posting_interval: 30,
            max_deals_per_day: 50,
        })
        .await;
}
