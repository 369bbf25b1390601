// File: brb-core/src/platforms/mod.rs

pub mod twitch;
pub mod twitter;

use std::sync::Arc;
use tracing::info;

use brb_common::models::FollowerCounts;
use brb_common::traits::FollowerFetcher;
use crate::config::Settings;
use crate::http::HttpClient;
use crate::Error;

pub use twitch::TwitchFollowers;
pub use twitter::TwitterFollowers;

/// Builds a fetcher for every platform whose credentials are all present.
/// Platforms that are not fully configured are skipped without any network traffic.
pub fn enabled_fetchers(
    settings: &Settings,
    http: Arc<dyn HttpClient>,
) -> Vec<Box<dyn FollowerFetcher>> {
    let mut fetchers: Vec<Box<dyn FollowerFetcher>> = Vec::new();

    match TwitchFollowers::from_credentials(&settings.twitch, http.clone()) {
        Some(f) => fetchers.push(Box::new(f)),
        None => info!("Twitch follower count disabled (credentials not configured)"),
    }
    match TwitterFollowers::from_credentials(&settings.twitter, http) {
        Some(f) => fetchers.push(Box::new(f)),
        None => info!("Twitter follower count disabled (credentials not configured)"),
    }

    fetchers
}

/// Asks each fetcher once, one after another. The first failure aborts the lot.
pub async fn fetch_follower_counts(
    fetchers: &[Box<dyn FollowerFetcher>],
) -> Result<FollowerCounts, Error> {
    let mut counts = FollowerCounts::default();
    for fetcher in fetchers {
        let platform = fetcher.platform();
        let count = fetcher
            .fetch_follower_count()
            .await
            .map_err(|e| e.for_platform(platform))?;
        info!("{} followers: {}", platform, count);
        counts.set(platform, count);
    }
    Ok(counts)
}
