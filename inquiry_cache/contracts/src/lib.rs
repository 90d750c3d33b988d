use std::{future::Future, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

/// Key-value store for short lived state shared between requests, e.g. the
/// time of a session's last contact form submission.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CacheService: Sized + Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None` if there is none or it
    /// has expired.
    fn get<T: DeserializeOwned + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;

    /// Stores `value` under `key`, replacing the previous value. The entry
    /// disappears after `ttl`.
    fn set<T: Serialize + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Verifies that the store is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockCacheService {
    pub fn with_get<T: DeserializeOwned + Send + 'static>(
        mut self,
        key: String,
        result: Option<T>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get_error<T: DeserializeOwned + Send + 'static>(
        mut self,
        key: String,
        message: &'static str,
    ) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(message)))));
        self
    }

    pub fn with_set<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
        ttl: Duration,
    ) -> Self {
        self.expect_set()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(value),
                mockall::predicate::eq(ttl),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(Ok(()))));
        self
    }
}
