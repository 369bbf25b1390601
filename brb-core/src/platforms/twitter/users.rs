// File: brb-core/src/platforms/twitter/users.rs

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use brb_common::models::Platform;
use brb_common::traits::FollowerFetcher;
use crate::config::TwitterCredentials;
use crate::http::HttpClient;
use crate::Error;

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Response from `GET /2/users/by`.
///
/// Unknown or suspended accounts show up in `errors` instead of `data`.
#[derive(Debug, Default, Deserialize)]
pub struct UserLookupResponse {
    #[serde(default)]
    pub data: Vec<UserData>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub public_metrics: PublicMetrics,
}

#[derive(Debug, Deserialize)]
pub struct PublicMetrics {
    pub followers_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub title: Option<String>,
    pub detail: Option<String>,
}

/// Looks a user up by handle and reads `public_metrics.followers_count`.
pub struct TwitterFollowers {
    http: Arc<dyn HttpClient>,
    base_url: String,
    bearer_token: String,
    username: String,
}

impl TwitterFollowers {
    /// Returns `None` unless both the bearer token and the username are set.
    pub fn from_credentials(creds: &TwitterCredentials, http: Arc<dyn HttpClient>) -> Option<Self> {
        if !creds.is_enabled() {
            return None;
        }
        Some(Self {
            http,
            base_url: DEFAULT_API_BASE.to_string(),
            bearer_token: creds.bearer_token.clone(),
            username: creds.username.trim_start_matches('@').to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}/2/users/by?usernames={}&user.fields=public_metrics",
            self.base_url,
            urlencoding::encode(&self.username),
        )
    }

    /// Picks our user out of the lookup response.
    fn followers_from(&self, resp: UserLookupResponse) -> Result<u64, Error> {
        let user = resp
            .data
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(&self.username))
            .or_else(|| resp.data.first());

        if let Some(user) = user {
            debug!("Resolved @{} to user id {}", user.username, user.id);
            return Ok(user.public_metrics.followers_count);
        }

        let reason = resp
            .errors
            .first()
            .and_then(|e| e.detail.clone().or_else(|| e.title.clone()))
            .unwrap_or_else(|| format!("user @{} not found", self.username));
        warn!("Twitter lookup for @{} returned no users", self.username);
        Err(Error::fetch(Platform::Twitter, reason))
    }
}

#[async_trait]
impl FollowerFetcher for TwitterFollowers {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    async fn fetch_follower_count(&self) -> Result<u64, Error> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.bearer_token),
        );

        let body = self
            .http
            .get(self.request_url(), headers)
            .await
            .map_err(|e| e.for_platform(Platform::Twitter))?;

        let parsed: UserLookupResponse = serde_json::from_str(&body).map_err(|e| {
            Error::fetch(Platform::Twitter, format!("Error parsing /2/users/by JSON: {e}"))
        })?;

        self.followers_from(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpClient;

    fn fetcher() -> TwitterFollowers {
        let creds = TwitterCredentials {
            bearer_token: "tok".into(),
            username: "@SomeStreamer".into(),
        };
        let http: Arc<dyn HttpClient> = Arc::new(MockHttpClient::new());
        TwitterFollowers::from_credentials(&creds, http).expect("enabled")
    }

    #[test]
    fn test_leading_at_sign_is_dropped() {
        assert!(fetcher().request_url().contains("usernames=SomeStreamer&"));
    }

    #[test]
    fn test_matching_username_wins_over_first_entry() {
        let resp: UserLookupResponse = serde_json::from_str(
            r#"{"data":[
                {"id":"1","username":"other","public_metrics":{"followers_count":1}},
                {"id":"2","username":"somestreamer","public_metrics":{"followers_count":77}}
            ]}"#,
        )
        .expect("valid json");
        assert_eq!(fetcher().followers_from(resp).expect("found"), 77);
    }

    #[test]
    fn test_api_error_detail_is_reported() {
        let resp: UserLookupResponse = serde_json::from_str(
            r#"{"errors":[{"title":"Not Found Error","detail":"Could not find user with usernames: [SomeStreamer]."}]}"#,
        )
        .expect("valid json");
        let err = fetcher().followers_from(resp).unwrap_err();
        assert!(err.to_string().contains("Could not find user"), "{err}");
    }
}
