use serde::Deserialize;

/// Body for `POST /api/scrapers/run`. Absent platform id means scan
/// every active platform.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScraperRequest {
    pub platform_id: Option<i32>,
}

/// Body for `POST /api/actions/post-deal`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDealRequest {
    pub deal_id: i32,
    pub group_id: i32,
}
