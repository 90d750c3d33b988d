use std::{future::Future, sync::Arc};

use anyhow::Context;
use inquiry_models::contact::ContactForm;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

#[cfg_attr(test, mockall::automock)]
pub trait ContactFormApi: Send + Sync + 'static {
    /// Posts the form to the contact endpoint.
    ///
    /// Any response carrying a `{"success", "message"}` body is returned, no
    /// matter the status code. Everything else is an error.
    fn submit(
        &self,
        form: &ContactForm,
    ) -> impl Future<Output = anyhow::Result<ContactFormResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactFormResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ContactFormClient {
    client: HttpClient,
    endpoint: Arc<Url>,
}

impl ContactFormClient {
    pub fn new(client: HttpClient, endpoint: Url) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ContactFormApi for ContactFormClient {
    #[tracing::instrument(skip(self, form), fields(endpoint = %self.endpoint))]
    async fn submit(&self, form: &ContactForm) -> anyhow::Result<ContactFormResponse> {
        self.client
            .post((*self.endpoint).clone())
            .form(&FormRequest {
                name: &form.name,
                email: &form.email,
                subject: &form.subject,
                message: &form.message,
                website: &form.website,
            })
            .send()
            .await
            .context("Failed to send contact form")?
            .json::<ContactFormResponse>()
            .await
            .context("Failed to read contact form response")
    }
}

#[derive(Serialize)]
struct FormRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    website: &'a str,
}

#[cfg(test)]
mod tests {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        routing, Form, Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use tokio::net::TcpListener;

    use super::*;

    #[derive(Deserialize)]
    struct ReceivedForm {
        name: String,
        email: String,
        website: String,
    }

    async fn contact(Form(form): Form<ReceivedForm>) -> Response {
        if form.email == "tanaka@example.com" && form.name == "田中太郎" && form.website.is_empty()
        {
            Json(serde_json::json!({"success": true, "message": "ok"})).into_response()
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"success": false, "message": "invalid"})),
            )
                .into_response()
        }
    }

    async fn serve(router: Router) -> Url {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/contact").parse().unwrap()
    }

    fn sut(endpoint: Url) -> ContactFormClient {
        ContactFormClient::new(HttpClient::new().unwrap(), endpoint)
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "田中太郎".into(),
            email: "tanaka@example.com".into(),
            subject: "お問い合わせ".into(),
            message: "テストです".into(),
            website: String::new(),
        }
    }

    #[tokio::test]
    async fn success() {
        // Arrange
        let endpoint = serve(Router::new().route("/contact", routing::post(contact))).await;

        // Act
        let result = sut(endpoint).submit(&form()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactFormResponse {
                success: true,
                message: "ok".into()
            }
        );
    }

    #[tokio::test]
    async fn structured_failure() {
        // Arrange
        let endpoint = serve(Router::new().route("/contact", routing::post(contact))).await;
        let form = ContactForm {
            email: "not-an-email".into(),
            ..form()
        };

        // Act
        let result = sut(endpoint).submit(&form).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactFormResponse {
                success: false,
                message: "invalid".into()
            }
        );
    }

    #[tokio::test]
    async fn unstructured_response() {
        // Arrange
        let endpoint = serve(Router::new().route(
            "/contact",
            routing::post(|| async { (StatusCode::BAD_GATEWAY, "Bad Gateway") }),
        ))
        .await;

        // Act
        let result = sut(endpoint).submit(&form()).await;

        // Assert
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unreachable() {
        // Arrange
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        // Act
        let result = sut(format!("http://{addr}/contact").parse().unwrap())
            .submit(&form())
            .await;

        // Assert
        assert!(result.is_err());
    }
}
