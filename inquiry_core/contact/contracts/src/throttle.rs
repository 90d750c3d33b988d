use std::future::Future;

use inquiry_models::{session::ContactSessionId, throttle::ThrottleDecision};

/// Enforces the minimum interval between submissions of one session.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactThrottleService: Send + Sync + 'static {
    /// Checks the session's last submission time and records the current
    /// attempt if it is allowed.
    fn check(
        &self,
        session: ContactSessionId,
    ) -> impl Future<Output = anyhow::Result<ThrottleDecision>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactThrottleService {
    pub fn with_check(mut self, session: ContactSessionId, result: ThrottleDecision) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(session))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
