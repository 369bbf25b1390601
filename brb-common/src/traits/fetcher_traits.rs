// File: brb-common/src/traits/fetcher_traits.rs

use async_trait::async_trait;
use crate::Error;
use crate::models::Platform;

/// One configured platform that can report how many followers an account has.
///
/// Only built when every credential the platform needs is present, so an
/// instance always represents an enabled platform.
#[mockall::automock]
#[async_trait]
pub trait FollowerFetcher: Send + Sync {
    fn platform(&self) -> Platform;

    /// Makes the single network round trip. Any failure is fatal to the caller.
    async fn fetch_follower_count(&self) -> Result<u64, Error>;
}
