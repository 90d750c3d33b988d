use std::{collections::HashSet, time::Duration};

use chrono::{DateTime, Utc};
use inquiry_models::contact::{ContactField, ContactForm};
use inquiry_shared_contracts::time::TimeService;
use tracing::warn;

use crate::{
    client::ContactFormApi,
    validate::{missing_required, validate_field},
};

/// How long a notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "お問い合わせありがとうございます。メッセージを送信しました。";
pub const DEFAULT_ERROR_MESSAGE: &str = "エラーが発生しました。もう一度お試しください。";
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "送信に失敗しました。通信環境をご確認のうえ、もう一度お試しください。";

/// State of a contact form as seen by the visitor.
#[derive(Debug)]
pub struct ContactFormController<Api, Time> {
    api: Api,
    time: Time,
    form: ContactForm,
    flagged: HashSet<ContactField>,
    submitting: bool,
    notice: Option<FormNotice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormNotice {
    pub kind: FormNoticeKind,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormNoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields are empty, nothing has been sent.
    Blocked(Vec<ContactField>),
    Succeeded,
    Failed,
    TransportFailed,
}

impl<Api, Time> ContactFormController<Api, Time>
where
    Api: ContactFormApi,
    Time: TimeService,
{
    pub fn new(api: Api, time: Time) -> Self {
        Self {
            api,
            time,
            form: ContactForm::default(),
            flagged: HashSet::new(),
            submitting: false,
            notice: None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        *self.form.get_mut(field) = value.into();
    }

    /// Revalidates `field` after it lost focus and returns whether it is valid.
    pub fn blur(&mut self, field: ContactField) -> bool {
        let valid = validate_field(field, self.form.get(field));
        if valid {
            self.flagged.remove(&field);
        } else {
            self.flagged.insert(field);
        }
        valid
    }

    pub fn is_flagged(&self, field: ContactField) -> bool {
        self.flagged.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&FormNotice> {
        self.notice.as_ref()
    }

    /// Hides the notice once it has been visible for [`NOTICE_DURATION`].
    /// Returns `true` if a notice has been removed.
    pub fn clear_expired(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|notice| now >= notice.shown_at + NOTICE_DURATION);
        if expired {
            self.notice = None;
        }
        expired
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let missing = missing_required(&self.form);
        if !missing.is_empty() {
            return SubmitOutcome::Blocked(missing);
        }

        self.submitting = true;
        let result = self.api.submit(&self.form).await;
        self.submitting = false;

        let (outcome, kind, text) = match result {
            Ok(response) if response.success => {
                self.form = ContactForm::default();
                self.flagged.clear();
                (
                    SubmitOutcome::Succeeded,
                    FormNoticeKind::Success,
                    message_or(response.message, DEFAULT_SUCCESS_MESSAGE),
                )
            }
            Ok(response) => (
                SubmitOutcome::Failed,
                FormNoticeKind::Error,
                message_or(response.message, DEFAULT_ERROR_MESSAGE),
            ),
            Err(err) => {
                warn!("contact form submission failed: {err:#}");
                (
                    SubmitOutcome::TransportFailed,
                    FormNoticeKind::Error,
                    TRANSPORT_ERROR_MESSAGE.into(),
                )
            }
        };

        self.notice = Some(FormNotice {
            kind,
            text,
            shown_at: self.time.now(),
        });

        outcome
    }
}

fn message_or(message: String, default: &str) -> String {
    if message.is_empty() {
        default.into()
    } else {
        message
    }
}
