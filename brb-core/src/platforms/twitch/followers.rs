// File: brb-core/src/platforms/twitch/followers.rs

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use brb_common::models::Platform;
use brb_common::traits::FollowerFetcher;
use crate::config::TwitchCredentials;
use crate::http::HttpClient;
use crate::Error;

pub const DEFAULT_HELIX_BASE: &str = "https://api.twitch.tv";

/// Response from `GET /helix/channels/followers`.
///
/// Only `total` matters here; the follower list itself is ignored.
#[derive(Debug, Deserialize)]
pub struct ChannelFollowersResponse {
    /// The total number of users that follow this broadcaster.
    pub total: u64,
}

/// Reads the follower total for one broadcaster from the Helix API.
pub struct TwitchFollowers {
    http: Arc<dyn HttpClient>,
    base_url: String,
    client_id: String,
    app_access_token: String,
    broadcaster_id: String,
}

impl TwitchFollowers {
    /// Returns `None` unless client id, client secret, app token and user id are all set.
    pub fn from_credentials(creds: &TwitchCredentials, http: Arc<dyn HttpClient>) -> Option<Self> {
        if !creds.is_enabled() {
            return None;
        }
        Some(Self {
            http,
            base_url: DEFAULT_HELIX_BASE.to_string(),
            client_id: creds.client_id.clone(),
            app_access_token: creds.app_access_token.clone(),
            broadcaster_id: creds.user_id.clone(),
        })
    }

    /// Points the fetcher at a different Helix host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}/helix/channels/followers?broadcaster_id={}&first=1",
            self.base_url,
            urlencoding::encode(&self.broadcaster_id),
        )
    }
}

#[async_trait]
impl FollowerFetcher for TwitchFollowers {
    fn platform(&self) -> Platform {
        Platform::Twitch
    }

    async fn fetch_follower_count(&self) -> Result<u64, Error> {
        let mut headers = HashMap::new();
        headers.insert("Client-Id".to_string(), self.client_id.clone());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.app_access_token),
        );

        let body = self
            .http
            .get(self.request_url(), headers)
            .await
            .map_err(|e| e.for_platform(Platform::Twitch))?;

        let parsed: ChannelFollowersResponse = serde_json::from_str(&body).map_err(|e| {
            Error::fetch(
                Platform::Twitch,
                format!("Error parsing /channels/followers JSON: {e}"),
            )
        })?;
        debug!("Helix reports {} followers for {}", parsed.total, self.broadcaster_id);

        Ok(parsed.total)
    }
}
