// File: brb-common/src/models/mod.rs
pub mod output;
pub mod platform;

pub use output::{FollowerCounts, Output};
pub use platform::Platform;
