use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use inquiry_cache_contracts::CacheService;
use inquiry_core_contact_contracts::throttle::ContactThrottleService;
use inquiry_models::{
    session::ContactSessionId,
    throttle::{ThrottleDecision, ThrottleState},
};
use inquiry_shared_contracts::time::TimeService;

#[derive(Debug, Clone)]
pub struct ContactThrottleServiceImpl<Time, Cache> {
    time: Time,
    cache: Cache,
    config: ContactThrottleServiceConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactThrottleServiceConfig {
    /// Minimum time between two submissions of the same session
    pub window: Duration,
}

impl<Time, Cache> ContactThrottleServiceImpl<Time, Cache> {
    pub fn new(time: Time, cache: Cache, config: ContactThrottleServiceConfig) -> Self {
        Self {
            time,
            cache,
            config,
        }
    }
}

impl<Time, Cache> ContactThrottleService for ContactThrottleServiceImpl<Time, Cache>
where
    Time: TimeService,
    Cache: CacheService,
{
    #[tracing::instrument(skip(self))]
    async fn check(&self, session: ContactSessionId) -> anyhow::Result<ThrottleDecision> {
        let cache_key = cache_key(session);

        let state = ThrottleState {
            last_submission: self
                .cache
                .get::<DateTime<Utc>>(&cache_key)
                .await
                .context("Failed to get last submission time from cache")?,
        };

        let (decision, state) = state.check(self.time.now(), self.config.window);

        if let Some(last_submission) = state.last_submission.filter(|_| decision.is_allowed()) {
            // expires together with the window it guards
            self.cache
                .set(&cache_key, &last_submission, self.config.window)
                .await
                .context("Failed to save last submission time in cache")?;
        }

        Ok(decision)
    }
}

fn cache_key(session: ContactSessionId) -> String {
    format!("contact_last_submission:{}", session.into_inner())
}
