use inquiry_core_contact_contracts::{ContactValidationError, ContactValidationErrors};
use inquiry_models::{
    contact::{
        ContactAuthor, ContactAuthorName, ContactField, ContactForm, ContactMessageContent,
        ContactSubject, ContactSubmission,
    },
    email_address::EmailAddress,
};

/// Validates all fields of `form` and collects one error per invalid field.
pub fn validate(form: &ContactForm) -> Result<ContactSubmission, ContactValidationErrors> {
    let mut errors = Vec::new();

    let name = text_field(ContactField::Name, &form.name, |v| {
        ContactAuthorName::try_new(v)
    });
    let email = email_field(&form.email);
    let subject = text_field(ContactField::Subject, &form.subject, |v| {
        ContactSubject::try_new(v)
    });
    let message = text_field(ContactField::Message, &form.message, |v| {
        ContactMessageContent::try_new(v)
    });

    let name = name.map_err(|err| errors.push(err)).ok();
    let email = email.map_err(|err| errors.push(err)).ok();
    let subject = subject.map_err(|err| errors.push(err)).ok();
    let message = message.map_err(|err| errors.push(err)).ok();

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) => Ok(ContactSubmission {
            author: ContactAuthor { name, email },
            subject,
            message,
        }),
        _ => Err(ContactValidationErrors(errors)),
    }
}

fn text_field<T, E>(
    field: ContactField,
    value: &str,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Result<T, ContactValidationError> {
    parse(value.to_owned()).map_err(|_| {
        if value.trim().is_empty() {
            ContactValidationError::Required(field)
        } else {
            ContactValidationError::TooLong(field)
        }
    })
}

fn email_field(value: &str) -> Result<EmailAddress, ContactValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ContactValidationError::Required(ContactField::Email));
    }
    if !has_email_shape(value) {
        return Err(ContactValidationError::InvalidEmail);
    }
    if value.chars().count() > ContactField::Email.max_chars() {
        return Err(ContactValidationError::TooLong(ContactField::Email));
    }

    value
        .parse()
        .map_err(|_| ContactValidationError::InvalidEmail)
}

/// `local@domain.tld` without whitespace, every domain label non-empty.
fn has_email_shape(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
