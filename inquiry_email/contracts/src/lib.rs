use std::future::Future;

use inquiry_models::email_address::{EmailAddress, EmailAddressWithName};

pub mod template;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Sends the email. Returns `false` if the server rejected it.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// A plain text UTF-8 mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    /// Display name used together with the configured sender address
    pub sender_name: Option<String>,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<EmailAddress>,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
