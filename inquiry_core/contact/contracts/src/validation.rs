use inquiry_models::contact::ContactField;
use thiserror::Error;

/// A rule violation of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("{}", required_message(.0))]
    Required(ContactField),
    #[error("有効なメールアドレスを入力してください")]
    InvalidEmail,
    #[error("{}", too_long_message(.0))]
    TooLong(ContactField),
}

fn label(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "お名前",
        ContactField::Email => "メールアドレス",
        ContactField::Subject => "件名",
        ContactField::Message => "メッセージ",
    }
}

fn required_message(field: &ContactField) -> String {
    format!("{}は必須です", label(*field))
}

fn too_long_message(field: &ContactField) -> String {
    format!(
        "{}は{}文字以内で入力してください",
        label(*field),
        field.max_chars()
    )
}

/// All violations of a submission, at most one per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactValidationErrors(pub Vec<ContactValidationError>);

impl ContactValidationErrors {
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// Joins the messages the way they are shown to the user.
impl std::fmt::Display for ContactValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("、"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        for (error, expected) in [
            (ContactValidationError::Required(ContactField::Name), "お名前は必須です"),
            (
                ContactValidationError::Required(ContactField::Email),
                "メールアドレスは必須です",
            ),
            (ContactValidationError::Required(ContactField::Subject), "件名は必須です"),
            (
                ContactValidationError::Required(ContactField::Message),
                "メッセージは必須です",
            ),
            (
                ContactValidationError::InvalidEmail,
                "有効なメールアドレスを入力してください",
            ),
            (
                ContactValidationError::TooLong(ContactField::Name),
                "お名前は100文字以内で入力してください",
            ),
            (
                ContactValidationError::TooLong(ContactField::Email),
                "メールアドレスは255文字以内で入力してください",
            ),
            (
                ContactValidationError::TooLong(ContactField::Subject),
                "件名は200文字以内で入力してください",
            ),
            (
                ContactValidationError::TooLong(ContactField::Message),
                "メッセージは2000文字以内で入力してください",
            ),
        ] {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn joined() {
        let errors = ContactValidationErrors(vec![
            ContactValidationError::Required(ContactField::Name),
            ContactValidationError::InvalidEmail,
        ]);
        assert_eq!(
            errors.to_string(),
            "お名前は必須です、有効なメールアドレスを入力してください"
        );
    }
}
