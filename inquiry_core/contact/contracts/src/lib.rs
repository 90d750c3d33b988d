use std::future::Future;

use chrono::{DateTime, Utc};
use inquiry_models::{contact::ContactForm, session::ContactSessionId};
use thiserror::Error;

pub use validation::{ContactValidationError, ContactValidationErrors};

pub mod throttle;
mod validation;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates, throttles and delivers a contact form submission.
    fn submit(
        &self,
        session: ContactSessionId,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    /// The owner notification has been delivered.
    Accepted,
    /// The honeypot field was filled in, nothing has been sent.
    Dropped,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("{0}")]
    Validation(ContactValidationErrors),
    #[error("Too many submissions, retry after {until}.")]
    RateLimited { until: DateTime<Utc> },
    #[error("Failed to deliver the notification.")]
    Delivery,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        session: ContactSessionId,
        form: ContactForm,
        result: Result<ContactSubmitOutcome, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(session),
                mockall::predicate::eq(form),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
