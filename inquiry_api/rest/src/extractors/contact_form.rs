use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{multipart::Multipart, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use tracing::debug;

use crate::models::contact::ApiContactForm;

/// Contact form body, either `application/x-www-form-urlencoded` or
/// `multipart/form-data` (what browsers send for a `FormData` object).
///
/// A body that cannot be read yields an empty form, which then fails
/// validation like any other incomplete submission.
pub struct ContactFormBody(pub ApiContactForm);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ContactFormBody {
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = if is_multipart(&request) {
            read_multipart(request, state).await
        } else {
            Form::<ApiContactForm>::from_request(request, state)
                .await
                .map(|Form(form)| form)
                .map_err(Into::into)
        };

        Ok(Self(form.unwrap_or_else(|err| {
            debug!("unreadable form body: {err:#}");
            ApiContactForm::default()
        })))
    }
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("multipart/form-data"))
}

async fn read_multipart<S: Send + Sync>(
    request: Request,
    state: &S,
) -> anyhow::Result<ApiContactForm> {
    let mut multipart = Multipart::from_request(request, state).await?;
    let mut form = ApiContactForm::default();

    // unknown parts are skipped, a repeated field keeps its last value
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name() else { continue };
        let Some(slot) = form.field_mut(name) else {
            continue;
        };
        *slot = field.text().await?;
    }

    Ok(form)
}
