// File: brb-core/src/app.rs
//
// Startup wiring: settings in, compiled template and fetchers out, then the
// fetch phase followed by the countdown.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use brb_common::traits::FollowerFetcher;
use crate::config::Settings;
use crate::countdown::{Countdown, CountdownReport};
use crate::http::HttpClient;
use crate::platforms::{enabled_fetchers, fetch_follower_counts};
use crate::template::{Template, DEFAULT_MESSAGE};
use crate::terminal::LiveWriter;
use crate::Error;

/// One countdown, fully configured and ready to run.
pub struct Brb {
    duration: Duration,
    template: Template,
    fetchers: Vec<Box<dyn FollowerFetcher>>,
}

impl Brb {
    pub fn new(
        duration: Duration,
        template: Template,
        fetchers: Vec<Box<dyn FollowerFetcher>>,
    ) -> Self {
        Self {
            duration,
            template,
            fetchers,
        }
    }

    /// Compiles the template and builds a fetcher for each configured platform.
    ///
    /// `message` is the command-line template; it wins over the one in
    /// `settings`, which wins over [`DEFAULT_MESSAGE`]. Template errors surface
    /// here, before any network call.
    pub fn from_settings(
        duration: Duration,
        message: Option<&str>,
        settings: &Settings,
        http: Arc<dyn HttpClient>,
    ) -> Result<Self, Error> {
        let source = message
            .or(settings.message.as_deref())
            .unwrap_or(DEFAULT_MESSAGE);
        let template = Template::parse(source)?;
        let fetchers = enabled_fetchers(settings, http);
        Ok(Self::new(duration, template, fetchers))
    }

    pub fn enabled_platforms(&self) -> Vec<String> {
        self.fetchers.iter().map(|f| f.platform().to_string()).collect()
    }

    /// Fetches follower counts, then counts down. A fetch failure returns
    /// before `writer` is ever started.
    pub async fn run<W: LiveWriter>(self, writer: &mut W) -> Result<CountdownReport, Error> {
        if !self.fetchers.is_empty() {
            info!("Fetching follower counts for: {}", self.enabled_platforms().join(", "));
        }
        let followers = fetch_follower_counts(&self.fetchers).await?;

        Countdown::new(self.template, followers)
            .run(self.duration, writer)
            .await
    }
}
