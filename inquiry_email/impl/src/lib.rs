use anyhow::anyhow;
use inquiry_email_contracts::{Email, EmailService};
use inquiry_models::email_address::EmailAddress;
use inquiry_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

pub mod template;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub async fn new(url: &str, from: EmailAddress) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        Self::new("smtp://dummy", "dummy@example.com".parse().unwrap())
            .await
            .unwrap()
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(Mailbox::new(email.sender_name, self.from.0.clone()))
            .to(email.recipient.0)
            .apply_map(
                email.reply_to.map(|x| Mailbox::new(None, x.0)),
                MessageBuilder::reply_to,
            )
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    #[tracing::instrument(skip(self, email), fields(recipient = email.recipient.as_str()))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_message() {
        // Arrange
        let sut = EmailServiceImpl::new("smtp://localhost", "noreply@example.com".parse().unwrap())
            .await
            .unwrap();

        // Act
        let message = sut
            .build_message(Email {
                recipient: "owner@example.com".parse().unwrap(),
                sender_name: Some("Max Mustermann".into()),
                subject: "Hello".into(),
                body: "Hello World!".into(),
                reply_to: Some("max@example.de".parse().unwrap()),
            })
            .unwrap();

        // Assert
        let owner = "owner@example.com".parse::<lettre::Address>().unwrap();
        let from = "noreply@example.com".parse::<lettre::Address>().unwrap();
        let envelope = message.envelope();
        assert_eq!(envelope.to(), [owner].as_slice());
        assert_eq!(envelope.from(), Some(&from));

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Max Mustermann"));
        assert!(formatted.contains("Reply-To: max@example.de"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("Hello World!"));
    }
}
