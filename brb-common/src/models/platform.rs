// File: brb-common/src/models/platform.rs

use std::fmt;

/// The platforms we know how to ask for a follower count.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Platform {
    Twitch,
    Twitter,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Twitch => write!(f, "twitch"),
            Platform::Twitter => write!(f, "twitter"),
        }
    }
}
