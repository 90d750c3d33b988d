use std::sync::Arc;

use anyhow::Context;
use inquiry_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl TemplateServiceImpl {
    /// Compiles all templates.
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .with_context(|| format!("Failed to compile template {name}"))?;
        }

        Ok(Self {
            state: State(tera.into()),
        })
    }
}

impl TemplateService for TemplateServiceImpl {
    #[tracing::instrument(skip_all, fields(template = T::NAME))]
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use inquiry_templates_contracts::{
        ContactAcknowledgmentTemplate, ContactNotificationTemplate,
    };

    use super::*;

    #[test]
    fn contact_notification() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactNotificationTemplate {
                name: "田中太郎".into(),
                email: "tanaka@example.com".into(),
                subject: "お問い合わせ".into(),
                message: "<b>テスト</b>です".into(),
            })
            .unwrap();

        // Assert
        assert!(result.starts_with("以下の内容でお問い合わせがありました。\n"));
        assert!(result.contains("お名前: 田中太郎\n"));
        assert!(result.contains("メールアドレス: tanaka@example.com\n"));
        assert!(result.contains("件名: お問い合わせ\n"));
        assert!(result.contains("メッセージ:\n<b>テスト</b>です\n"));
    }

    #[test]
    fn contact_acknowledgment() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactAcknowledgmentTemplate {
                name: "田中太郎".into(),
                subject: "お問い合わせ".into(),
                message: "テストです".into(),
            })
            .unwrap();

        // Assert
        assert!(result.starts_with("田中太郎 様\n"));
        assert!(result.contains("3営業日以内"));
        assert!(result.contains("件名: お問い合わせ\n"));
        assert!(result.contains("メッセージ:\nテストです\n"));
    }
}
