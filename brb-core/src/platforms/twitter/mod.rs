// File: brb-core/src/platforms/twitter/mod.rs

pub mod users;

pub use users::{TwitterFollowers, UserLookupResponse, DEFAULT_API_BASE};
