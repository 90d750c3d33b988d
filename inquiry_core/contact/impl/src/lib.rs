use std::sync::Arc;

use chrono::{DateTime, Utc};
use inquiry_core_contact_contracts::{
    throttle::ContactThrottleService, ContactFeatureService, ContactSubmitError,
    ContactSubmitOutcome,
};
use inquiry_email_contracts::template::TemplateEmailService;
use inquiry_models::{
    contact::{ContactForm, ContactSubmission},
    email_address::EmailAddressWithName,
    session::ContactSessionId,
    throttle::ThrottleDecision,
};
use inquiry_shared_contracts::{submission_log::SubmissionLogService, time::TimeService};
use inquiry_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};
use tracing::{error, info, warn};

pub mod honeypot;
pub mod throttle;
pub mod validate;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Time, Throttle, TemplateEmail, SubmissionLog> {
    time: Time,
    throttle: Throttle,
    template_email: TemplateEmail,
    submission_log: SubmissionLog,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Recipient of the owner notification
    pub email: Arc<EmailAddressWithName>,
    /// Sender name of the acknowledgment
    pub site_name: Arc<str>,
    /// Whether the submitter gets an acknowledgment
    pub acknowledgment: bool,
}

impl<Time, Throttle, TemplateEmail, SubmissionLog>
    ContactFeatureServiceImpl<Time, Throttle, TemplateEmail, SubmissionLog>
{
    pub fn new(
        time: Time,
        throttle: Throttle,
        template_email: TemplateEmail,
        submission_log: SubmissionLog,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            time,
            throttle,
            template_email,
            submission_log,
            config,
        }
    }
}

impl<Time, Throttle, TemplateEmail, SubmissionLog> ContactFeatureService
    for ContactFeatureServiceImpl<Time, Throttle, TemplateEmail, SubmissionLog>
where
    Time: TimeService,
    Throttle: ContactThrottleService,
    TemplateEmail: TemplateEmailService,
    SubmissionLog: SubmissionLogService,
{
    #[tracing::instrument(skip(self, form))]
    async fn submit(
        &self,
        session: ContactSessionId,
        form: ContactForm,
    ) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        if honeypot::is_triggered(&form.website) {
            info!("honeypot triggered, dropping submission");
            return Ok(ContactSubmitOutcome::Dropped);
        }

        let submission = validate::validate(&form).map_err(ContactSubmitError::Validation)?;

        if let ThrottleDecision::Rejected { until } = self.throttle.check(session).await? {
            info!(%until, "submission rate limited");
            return Err(ContactSubmitError::RateLimited { until });
        }

        let delivered = self.send_notification(&submission).await;

        if delivered && self.config.acknowledgment {
            self.send_acknowledgment(&submission).await;
        }

        self.log_attempt(self.time.now(), &submission, delivered).await;

        if delivered {
            Ok(ContactSubmitOutcome::Accepted)
        } else {
            Err(ContactSubmitError::Delivery)
        }
    }
}

impl<Time, Throttle, TemplateEmail, SubmissionLog>
    ContactFeatureServiceImpl<Time, Throttle, TemplateEmail, SubmissionLog>
where
    TemplateEmail: TemplateEmailService,
    SubmissionLog: SubmissionLogService,
{
    async fn send_notification(&self, submission: &ContactSubmission) -> bool {
        let data = ContactNotificationTemplate {
            name: submission.author.name.clone().into_inner(),
            email: submission.author.email.as_str().into(),
            subject: submission.subject.clone().into_inner(),
            message: submission.message.clone().into_inner(),
        };

        match self
            .template_email
            .send_contact_notification(
                (*self.config.email).clone(),
                &data,
                submission.author.email.clone(),
            )
            .await
        {
            Ok(delivered) => delivered,
            Err(err) => {
                error!("failed to send contact notification: {err:#}");
                false
            }
        }
    }

    async fn send_acknowledgment(&self, submission: &ContactSubmission) {
        let data = ContactAcknowledgmentTemplate {
            name: submission.author.name.clone().into_inner(),
            subject: submission.subject.clone().into_inner(),
            message: submission.message.clone().into_inner(),
        };

        let recipient = submission
            .author
            .email
            .clone()
            .with_name(data.name.clone());

        match self
            .template_email
            .send_contact_acknowledgment(recipient, &data, self.config.site_name.to_string())
            .await
        {
            Ok(true) => {}
            Ok(false) => warn!("contact acknowledgment was rejected"),
            Err(err) => warn!("failed to send contact acknowledgment: {err:#}"),
        }
    }

    async fn log_attempt(
        &self,
        now: DateTime<Utc>,
        submission: &ContactSubmission,
        delivered: bool,
    ) {
        let line = format!(
            "{} - Contact form submission from: {} - {}",
            now.format("%Y-%m-%d %H:%M:%S"),
            submission.author.email,
            if delivered { "Success" } else { "Failed" }
        );

        if let Err(err) = self.submission_log.append(line).await {
            warn!("failed to write submission log: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use inquiry_core_contact_contracts::{
        throttle::MockContactThrottleService, ContactValidationError,
    };
    use inquiry_email_contracts::template::MockTemplateEmailService;
    use inquiry_models::contact::ContactField;
    use inquiry_shared_contracts::{
        submission_log::MockSubmissionLogService, time::MockTimeService,
    };
    use inquiry_utils::assert_matches;

    use super::*;

    type Sut = ContactFeatureServiceImpl<
        MockTimeService,
        MockContactThrottleService,
        MockTemplateEmailService,
        MockSubmissionLogService,
    >;

    fn sut(
        time: MockTimeService,
        throttle: MockContactThrottleService,
        template_email: MockTemplateEmailService,
        submission_log: MockSubmissionLogService,
    ) -> Sut {
        ContactFeatureServiceImpl::new(
            time,
            throttle,
            template_email,
            submission_log,
            ContactFeatureConfig {
                email: Arc::new("example@example.com".parse().unwrap()),
                site_name: "Portfolio Site".into(),
                acknowledgment: true,
            },
        )
    }

    fn session() -> ContactSessionId {
        "0192d6b0-5c3a-7b8e-9f00-3c2a1b4d5e6f".parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 5).unwrap()
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "田中太郎".into(),
            email: "tanaka@example.com".into(),
            subject: "お問い合わせ".into(),
            message: "テストです".into(),
            website: String::new(),
        }
    }

    fn notification() -> ContactNotificationTemplate {
        ContactNotificationTemplate {
            name: "田中太郎".into(),
            email: "tanaka@example.com".into(),
            subject: "お問い合わせ".into(),
            message: "テストです".into(),
        }
    }

    fn acknowledgment() -> ContactAcknowledgmentTemplate {
        ContactAcknowledgmentTemplate {
            name: "田中太郎".into(),
            subject: "お問い合わせ".into(),
            message: "テストです".into(),
        }
    }

    fn with_notification(
        template_email: MockTemplateEmailService,
        result: anyhow::Result<bool>,
    ) -> MockTemplateEmailService {
        template_email.with_send_contact_notification(
            "example@example.com".parse().unwrap(),
            notification(),
            "tanaka@example.com".parse().unwrap(),
            result,
        )
    }

    fn with_acknowledgment(
        template_email: MockTemplateEmailService,
        result: anyhow::Result<bool>,
    ) -> MockTemplateEmailService {
        template_email.with_send_contact_acknowledgment(
            "tanaka@example.com"
                .parse::<inquiry_models::email_address::EmailAddress>()
                .unwrap()
                .with_name("田中太郎".into()),
            acknowledgment(),
            "Portfolio Site".into(),
            result,
        )
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let throttle =
            MockContactThrottleService::new().with_check(session(), ThrottleDecision::Allowed);
        let template_email = with_acknowledgment(
            with_notification(MockTemplateEmailService::new(), Ok(true)),
            Ok(true),
        );
        let submission_log = MockSubmissionLogService::new().with_append(
            "2024-04-01 09:30:05 - Contact form submission from: tanaka@example.com - Success"
                .into(),
        );

        let sut = sut(time, throttle, template_email, submission_log);

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Accepted));
    }

    #[tokio::test]
    async fn acknowledgment_failure_is_ignored() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let throttle =
            MockContactThrottleService::new().with_check(session(), ThrottleDecision::Allowed);
        let template_email = with_acknowledgment(
            with_notification(MockTemplateEmailService::new(), Ok(true)),
            Err(anyhow::anyhow!("connection reset")),
        );
        let submission_log = MockSubmissionLogService::new().with_append(
            "2024-04-01 09:30:05 - Contact form submission from: tanaka@example.com - Success"
                .into(),
        );

        let sut = sut(time, throttle, template_email, submission_log);

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Accepted));
    }

    #[tokio::test]
    async fn acknowledgment_disabled() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let throttle =
            MockContactThrottleService::new().with_check(session(), ThrottleDecision::Allowed);
        let template_email = with_notification(MockTemplateEmailService::new(), Ok(true));
        let submission_log = MockSubmissionLogService::new().with_append(
            "2024-04-01 09:30:05 - Contact form submission from: tanaka@example.com - Success"
                .into(),
        );

        let mut sut = sut(time, throttle, template_email, submission_log);
        sut.config.acknowledgment = false;

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Accepted));
    }

    #[tokio::test]
    async fn notification_rejected() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let throttle =
            MockContactThrottleService::new().with_check(session(), ThrottleDecision::Allowed);
        let template_email = with_notification(MockTemplateEmailService::new(), Ok(false));
        let submission_log = MockSubmissionLogService::new().with_append(
            "2024-04-01 09:30:05 - Contact form submission from: tanaka@example.com - Failed"
                .into(),
        );

        let sut = sut(time, throttle, template_email, submission_log);

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Delivery));
    }

    #[tokio::test]
    async fn notification_transport_error() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let throttle =
            MockContactThrottleService::new().with_check(session(), ThrottleDecision::Allowed);
        let template_email = with_notification(
            MockTemplateEmailService::new(),
            Err(anyhow::anyhow!("connection refused")),
        );
        let submission_log = MockSubmissionLogService::new().with_append_error(
            "2024-04-01 09:30:05 - Contact form submission from: tanaka@example.com - Failed"
                .into(),
        );

        let sut = sut(time, throttle, template_email, submission_log);

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Delivery));
    }

    #[tokio::test]
    async fn log_failure_is_ignored() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let throttle =
            MockContactThrottleService::new().with_check(session(), ThrottleDecision::Allowed);
        let template_email = with_acknowledgment(
            with_notification(MockTemplateEmailService::new(), Ok(true)),
            Ok(true),
        );
        let submission_log = MockSubmissionLogService::new().with_append_error(
            "2024-04-01 09:30:05 - Contact form submission from: tanaka@example.com - Success"
                .into(),
        );

        let sut = sut(time, throttle, template_email, submission_log);

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Accepted));
    }

    #[tokio::test]
    async fn validation_skips_throttle_and_mail() {
        // Arrange
        let sut = sut(
            MockTimeService::new(),
            MockContactThrottleService::new(),
            MockTemplateEmailService::new(),
            MockSubmissionLogService::new(),
        );

        let form = ContactForm {
            name: String::new(),
            email: "not-an-email".into(),
            ..form()
        };

        // Act
        let result = sut.submit(session(), form).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Validation(errors)) if errors.0 == [
                ContactValidationError::Required(ContactField::Name),
                ContactValidationError::InvalidEmail,
            ]
        );
    }

    #[tokio::test]
    async fn rate_limited() {
        // Arrange
        let until = now() + std::time::Duration::from_secs(42);
        let throttle = MockContactThrottleService::new()
            .with_check(session(), ThrottleDecision::Rejected { until });

        let sut = sut(
            MockTimeService::new(),
            throttle,
            MockTemplateEmailService::new(),
            MockSubmissionLogService::new(),
        );

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::RateLimited { until: u }) if *u == until);
    }

    #[tokio::test]
    async fn honeypot_drops_even_invalid_submissions() {
        // Arrange
        let sut = sut(
            MockTimeService::new(),
            MockContactThrottleService::new(),
            MockTemplateEmailService::new(),
            MockSubmissionLogService::new(),
        );

        let form = ContactForm {
            website: "http://spam.example".into(),
            ..Default::default()
        };

        // Act
        let result = sut.submit(session(), form).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Dropped));
    }

    #[tokio::test]
    async fn throttle_error() {
        // Arrange
        let mut throttle = MockContactThrottleService::new();
        throttle.expect_check().once().return_once(|_| {
            Box::pin(std::future::ready(Err::<ThrottleDecision, _>(anyhow::anyhow!(
                "cache unavailable"
            ))))
        });

        let sut = sut(
            MockTimeService::new(),
            throttle,
            MockTemplateEmailService::new(),
            MockSubmissionLogService::new(),
        );

        // Act
        let result = sut.submit(session(), form()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Other(_)));
    }
}
