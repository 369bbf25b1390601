// File: brb-core/src/platforms/twitch/mod.rs

pub mod followers;

pub use followers::{ChannelFollowersResponse, TwitchFollowers, DEFAULT_HELIX_BASE};
