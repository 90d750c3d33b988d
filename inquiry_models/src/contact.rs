use nutype::nutype;

use crate::email_address::EmailAddress;

/// The visible fields of the contact form, in the order their errors are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Name of the field in the form-encoded request body.
    pub const fn form_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Maximum length in unicode characters, measured after trimming.
    pub const fn max_chars(self) -> usize {
        match self {
            Self::Name => 100,
            Self::Email => 255,
            Self::Subject => 200,
            Self::Message => 2000,
        }
    }

    pub const fn is_email(self) -> bool {
        matches!(self, Self::Email)
    }
}

/// The raw values of a contact form submission, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Honeypot value
    pub website: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub author: ContactAuthor,
    pub subject: ContactSubject,
    pub message: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAuthor {
    pub name: ContactAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubject(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);
