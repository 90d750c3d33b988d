use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use inquiry_api_rest::RestServerConfig;
use inquiry_cache_contracts::CacheService;
use inquiry_cache_valkey::ValkeyCacheConfig;
use inquiry_config::Config;
use inquiry_core_contact_impl::{
    throttle::{ContactThrottleServiceConfig, ContactThrottleServiceImpl},
    ContactFeatureConfig, ContactFeatureServiceImpl,
};
use inquiry_email_contracts::EmailService;
use inquiry_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use inquiry_shared_impl::{submission_log::SubmissionLogServiceImpl, time::TimeServiceImpl};
use inquiry_templates_impl::TemplateServiceImpl;
use tracing::info;
use types::{Cache, Email, RestServer};

pub mod types;

/// Wires the services of the contact endpoint together.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    cache: Cache,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider, cache: Cache, email: Email) -> Self {
        Self {
            config,
            cache,
            email,
        }
    }

    /// Connects to the cache and the SMTP server and verifies both
    /// connections.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        info!("Connecting to valkey cache");
        let cache = Cache::connect(&ValkeyCacheConfig {
            url: config.cache.url.clone(),
            max_connections: config.cache.max_connections,
            min_connections: config.cache.min_connections,
            acquire_timeout: config.cache.acquire_timeout.into(),
            idle_timeout: config.cache.idle_timeout.map(Into::into),
            max_lifetime: config.cache.max_lifetime.map(Into::into),
        })
        .await?;
        cache.ping().await?;

        info!("Connecting to smtp server");
        let email = connect_email(config).await?;
        email.ping().await?;

        Ok(Self::new(ConfigProvider::new(config), cache, email))
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        let time = TimeServiceImpl;

        let template = TemplateServiceImpl::new()?;
        let template_email = TemplateEmailServiceImpl::new(self.email.clone(), template);

        let throttle = ContactThrottleServiceImpl::new(
            time,
            self.cache.clone(),
            self.config.contact_throttle_service_config,
        );

        let submission_log =
            SubmissionLogServiceImpl::new(self.config.submission_log_path.clone());

        let contact = ContactFeatureServiceImpl::new(
            time,
            throttle,
            template_email,
            submission_log,
            self.config.contact_feature_config.clone(),
        );

        Ok(RestServer::new(
            self.config.rest_server_config.clone(),
            contact,
        ))
    }
}

/// Service configuration derived from the [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    rest_server_config: RestServerConfig,

    // Shared
    submission_log_path: Option<PathBuf>,

    // Core
    contact_throttle_service_config: ContactThrottleServiceConfig,
    contact_feature_config: ContactFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
            session_cookie: config.session.cookie_name.as_str().into(),
        };

        // Shared
        let submission_log_path = config.contact.log_path.clone();

        // Core
        let contact_throttle_service_config = ContactThrottleServiceConfig {
            window: config.contact.rate_limit.into(),
        };

        let contact_feature_config = ContactFeatureConfig {
            email: Arc::new(config.contact.email.clone().into()),
            site_name: config.contact.site_name.as_str().into(),
            acknowledgment: config.contact.acknowledgment,
        };

        Self {
            rest_server_config,
            submission_log_path,
            contact_throttle_service_config,
            contact_feature_config,
        }
    }
}

pub async fn connect_email(config: &Config) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.email.smtp_url, config.email.from.clone())
        .await
        .context("Failed to connect to SMTP server")
}
