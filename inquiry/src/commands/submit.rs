use anyhow::{bail, Context};
use clap::Args;
use inquiry_client::{
    controller::{ContactFormController, FormNoticeKind, SubmitOutcome},
    http::HttpClient,
    ContactFormClient,
};
use inquiry_config::Config;
use inquiry_models::contact::ContactField;
use inquiry_shared_impl::time::TimeServiceImpl;
use tracing::warn;
use url::Url;

/// Fields of a contact form submission
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Contact endpoint, defaults to the configured http server
    #[arg(long)]
    endpoint: Option<Url>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    subject: String,
    #[arg(long)]
    message: String,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => format!("http://{}:{}/contact", config.http.host, config.http.port)
                .parse()
                .context("Failed to build contact endpoint url")?,
        };

        let client = ContactFormClient::new(HttpClient::new()?, endpoint);
        let mut form = ContactFormController::new(client, TimeServiceImpl);

        form.set_field(ContactField::Name, self.name);
        form.set_field(ContactField::Email, self.email);
        form.set_field(ContactField::Subject, self.subject);
        form.set_field(ContactField::Message, self.message);

        for field in ContactField::ALL {
            if !form.blur(field) {
                warn!("{} looks invalid", field.form_key());
            }
        }

        let outcome = form.submit().await;

        if let SubmitOutcome::Blocked(missing) = &outcome {
            let missing = missing
                .iter()
                .map(|field| field.form_key())
                .collect::<Vec<_>>();
            bail!("Required fields are empty: {}", missing.join(", "));
        }

        if let Some(notice) = form.notice() {
            println!("{}", notice.text);
            if notice.kind == FormNoticeKind::Error {
                bail!("Submission failed");
            }
        }

        Ok(())
    }
}
