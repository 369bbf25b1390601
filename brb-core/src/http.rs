//! HTTP client seam for the follower lookups.
//!
//! Platform fetchers talk to this trait rather than to reqwest directly, so
//! tests can script responses and count calls without touching the network.
//!
//! # Example Usage:
//! ```ignore
//! use std::sync::Arc;
//! use brb_core::http::{HttpClient, DefaultHttpClient};
//!
//! // In production code
//! let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
//!
//! // In tests
//! let mut http = MockHttpClient::new();
//! http.expect_get().times(0);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;
use crate::Error;

/// Minimal GET-only client. Non-2xx responses come back as errors.
#[mockall::automock]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Error>;
}

/// reqwest-backed client. No timeout beyond reqwest's defaults.
#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Error> {
        debug!("GET {}", url);
        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(response)
    }
}
