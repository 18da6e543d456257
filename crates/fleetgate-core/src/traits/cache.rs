//! Cache provider abstraction.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// String-keyed, string-valued cache with per-entry TTL.
///
/// Structured values are serialized to JSON by callers; the provider only
/// deals in strings so backends stay interchangeable.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get a value by key. `None` if absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with an explicit TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete every key starting with the given prefix. Returns the number
    /// of entries removed. Used for explicit invalidation on administrative
    /// mutation.
    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64>;
}
