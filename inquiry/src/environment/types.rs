use inquiry_cache_valkey::ValkeyCache;
use inquiry_core_contact_impl::{throttle::ContactThrottleServiceImpl, ContactFeatureServiceImpl};
use inquiry_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use inquiry_shared_impl::{submission_log::SubmissionLogServiceImpl, time::TimeServiceImpl};
use inquiry_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = inquiry_api_rest::RestServer<ContactFeature>;

// Infrastructure
pub type Cache = ValkeyCache;
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Shared
pub type Time = TimeServiceImpl;
pub type SubmissionLog = SubmissionLogServiceImpl;

// Core
pub type ContactThrottle = ContactThrottleServiceImpl<Time, Cache>;
pub type ContactFeature =
    ContactFeatureServiceImpl<Time, ContactThrottle, TemplateEmail, SubmissionLog>;
