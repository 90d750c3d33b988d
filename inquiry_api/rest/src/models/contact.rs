use inquiry_models::contact::ContactForm;
use serde::Deserialize;

/// Submitted form fields. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Honeypot, hidden from human visitors
    pub website: String,
}

impl ApiContactForm {
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "subject" => Some(&mut self.subject),
            "message" => Some(&mut self.message),
            "website" => Some(&mut self.website),
            _ => None,
        }
    }
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            website: value.website,
        }
    }
}
