use std::future::Future;

use inquiry_models::email_address::{EmailAddress, EmailAddressWithName};
use inquiry_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Notifies the site owner about a submission. Replies go to `reply_to`.
    fn send_contact_notification(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactNotificationTemplate,
        reply_to: EmailAddress,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Confirms receipt to the submitter.
    fn send_contact_acknowledgment(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactAcknowledgmentTemplate,
        sender_name: String,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_contact_notification(
        mut self,
        recipient: EmailAddressWithName,
        data: ContactNotificationTemplate,
        reply_to: EmailAddress,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_contact_notification()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
                mockall::predicate::eq(reply_to),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_send_contact_acknowledgment(
        mut self,
        recipient: EmailAddressWithName,
        data: ContactAcknowledgmentTemplate,
        sender_name: String,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_contact_acknowledgment()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
                mockall::predicate::eq(sender_name),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }
}
