pub mod config;
pub mod storage;
pub mod scraper;
pub mod telegram;
pub mod scheduler;
pub mod web;
