use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use inquiry_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use inquiry_models::session::ContactSessionId;
use uuid::Uuid;

use super::{error, internal_server_error, INTERNAL_SERVER_ERROR_MESSAGE};
use crate::{extractors::contact_form::ContactFormBody, models::ApiContactResponse};

pub const PATH: &str = "/contact";

pub const ACCEPTED_MESSAGE: &str = "お問い合わせありがとうございます。メッセージを送信しました。";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "POSTメソッドのみサポートしています";
pub const RATE_LIMITED_MESSAGE: &str =
    "送信が頻繁すぎます。しばらくしてからもう一度お試しください。";

struct ContactState<Contact> {
    service: Contact,
    session_cookie: Arc<str>,
}

pub fn router(service: Arc<impl ContactFeatureService>, session_cookie: Arc<str>) -> Router<()> {
    Router::new()
        .route(PATH, routing::post(submit).fallback(method_not_allowed))
        .with_state(Arc::new(ContactState {
            service,
            session_cookie,
        }))
}

async fn submit(
    state: State<Arc<ContactState<Arc<impl ContactFeatureService>>>>,
    jar: CookieJar,
    ContactFormBody(form): ContactFormBody,
) -> Response {
    let (jar, session) = session(jar, &state.session_cookie);

    let response = match state.service.submit(session, form.into()).await {
        Ok(ContactSubmitOutcome::Accepted | ContactSubmitOutcome::Dropped) => Json(
            ApiContactResponse {
                success: true,
                message: ACCEPTED_MESSAGE.into(),
            },
        )
        .into_response(),
        Err(ContactSubmitError::Validation(errors)) => {
            error(StatusCode::BAD_REQUEST, errors.to_string())
        }
        Err(ContactSubmitError::RateLimited { .. }) => {
            error(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE)
        }
        Err(ContactSubmitError::Delivery) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_MESSAGE)
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    };

    (jar, response).into_response()
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// Returns the session id of the request, issuing a new cookie if there is no
/// valid one.
fn session(jar: CookieJar, cookie_name: &str) -> (CookieJar, ContactSessionId) {
    if let Some(session) = jar
        .get(cookie_name)
        .and_then(|cookie| cookie.value().parse::<ContactSessionId>().ok())
    {
        return (jar, session);
    }

    let session = ContactSessionId::new(Uuid::new_v4());
    let cookie = Cookie::build((cookie_name.to_owned(), session.into_inner().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), session)
}
