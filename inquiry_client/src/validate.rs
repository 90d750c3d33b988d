use std::sync::LazyLock;

use inquiry_models::contact::{ContactField, ContactForm};
use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Checks a single field when it loses focus.
///
/// This only decides whether the field is highlighted. The server validates
/// every submission again and is the only authority.
pub fn validate_field(field: ContactField, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    !field.is_email() || EMAIL_REGEX.is_match(value)
}

/// Returns the fields that would stop a browser from submitting the form
/// because of their `required` attribute.
pub fn missing_required(form: &ContactForm) -> Vec<ContactField> {
    ContactField::ALL
        .into_iter()
        .filter(|&field| form.get(field).is_empty())
        .collect()
}
