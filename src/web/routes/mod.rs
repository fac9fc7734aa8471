pub mod action_routes;
pub mod dashboard_routes;
pub mod deal_routes;
pub mod group_routes;
pub mod affiliate_routes;
pub mod platform_routes;
pub mod purchase_routes;
pub mod scraper_routes;
pub mod settings_routes;
pub mod webhook_routes;
