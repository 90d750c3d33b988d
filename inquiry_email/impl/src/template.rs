use inquiry_email_contracts::{template::TemplateEmailService, Email, EmailService};
use inquiry_models::email_address::{EmailAddress, EmailAddressWithName};
use inquiry_templates_contracts::{
    ContactAcknowledgmentTemplate, ContactNotificationTemplate, Template, TemplateService,
};

const NOTIFICATION_SUBJECT_PREFIX: &str = "【お問い合わせ】";
const ACKNOWLEDGMENT_SUBJECT: &str = "【自動返信】お問い合わせありがとうございます";

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> TemplateEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

impl<EmailS, TemplateS> TemplateEmailService for TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_contact_notification(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactNotificationTemplate,
        reply_to: EmailAddress,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            data,
            format!("{NOTIFICATION_SUBJECT_PREFIX}{}", data.subject),
            Some(data.name.clone()),
            Some(reply_to),
        )
        .await
    }

    async fn send_contact_acknowledgment(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactAcknowledgmentTemplate,
        sender_name: String,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            data,
            ACKNOWLEDGMENT_SUBJECT.into(),
            Some(sender_name),
            None,
        )
        .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        data: &T,
        subject: String,
        sender_name: Option<String>,
        reply_to: Option<EmailAddress>,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                sender_name,
                subject,
                body: self.template.render(data)?,
                reply_to,
            })
            .await
    }
}
