// ================================================================
// File: brb-common/src/error.rs
// ================================================================

use thiserror::Error;
use crate::models::platform::Platform;

#[derive(Debug, Error)]
pub enum Error {
    /// The countdown argument did not match the duration grammar.
    #[error("parsing duration {input:?}: {reason}")]
    DurationParse { input: String, reason: String },

    /// The config file exists (or was asked for) but could not be read or parsed.
    #[error("reading config: {0}")]
    ConfigRead(String),

    /// Anything that went wrong while asking a platform for its follower count.
    #[error("getting {platform} followers: {message}")]
    Fetch { platform: Platform, message: String },

    #[error("parsing template: {0}")]
    Template(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn duration_parse(input: &str, reason: impl Into<String>) -> Self {
        Error::DurationParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn fetch(platform: Platform, message: impl Into<String>) -> Self {
        Error::Fetch {
            platform,
            message: message.into(),
        }
    }

    /// Re-labels a transport error with the platform it came from.
    /// Errors that already carry a platform pass through untouched.
    pub fn for_platform(self, platform: Platform) -> Self {
        if matches!(self, Error::Fetch { .. }) {
            return self;
        }
        Error::fetch(platform, self.to_string())
    }
}
