// File: brb-common/src/models/output.rs

use std::time::Duration;
use crate::models::platform::Platform;

/// Follower counts gathered before the countdown starts.
///
/// `None` means the platform was not configured; it is distinct from a
/// fetched count of zero only for logging, since templates treat both as false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowerCounts {
    pub twitch: Option<u64>,
    pub twitter: Option<u64>,
}

impl FollowerCounts {
    pub fn set(&mut self, platform: Platform, count: u64) {
        match platform {
            Platform::Twitch => self.twitch = Some(count),
            Platform::Twitter => self.twitter = Some(count),
        }
    }

    pub fn get(&self, platform: Platform) -> Option<u64> {
        match platform {
            Platform::Twitch => self.twitch,
            Platform::Twitter => self.twitter,
        }
    }
}

/// The record handed to the template on every tick. Rebuilt fresh each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    /// Time left, always whole seconds.
    pub countdown: Duration,
    pub followers: FollowerCounts,
}

impl Output {
    /// Builds a record, dropping any sub-second part of `remaining`.
    pub fn new(remaining: Duration, followers: FollowerCounts) -> Self {
        Self {
            countdown: Duration::from_secs(remaining.as_secs()),
            followers,
        }
    }
}
