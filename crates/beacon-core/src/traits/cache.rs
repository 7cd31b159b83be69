use std::future::Future;
use std::time::Duration;

use crate::errors::CacheError;

/// Key/value store backing the answer cache. Values are serialized JSON.
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CacheError>> + Send;

    fn set(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;

    /// Cheap health check. `false` turns every lookup into a miss.
    fn is_available(&self) -> impl Future<Output = bool> + Send;
}
