// File: brb-common/src/traits/mod.rs
pub mod fetcher_traits;

pub use fetcher_traits::FollowerFetcher;
