use anyhow::ensure;
use clap::Subcommand;
use inquiry_config::Config;
use inquiry_email_contracts::{Email, EmailService};
use inquiry_models::email_address::EmailAddressWithName;

use crate::environment::connect_email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = connect_email(&config).await?;

    let ok = email_service
        .send(Email {
            recipient,
            sender_name: Some(config.contact.site_name),
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
