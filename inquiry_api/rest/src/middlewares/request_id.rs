//! Tags every request with an id that is echoed in the `X-Request-Id` response
//! header and recorded in the trace span.
//!
//! A well-formed id sent by a proxy in front of the server is kept, anything
//! else is replaced by a fresh one.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::STANDARD_NO_PAD, Engine};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers()).unwrap_or_else(RequestId::new);
    request.extensions_mut().insert(request_id);
    let response = next.run(request).await;
    ([(REQUEST_ID_HEADER, request_id.to_string())], response).into_response()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }

    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let bytes = STANDARD_NO_PAD
            .decode(headers.get(REQUEST_ID_HEADER)?.as_bytes())
            .ok()?;
        Uuid::from_slice(&bytes).ok().map(Self)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Base64Display::new(self.0.as_bytes(), &STANDARD_NO_PAD).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn forwarded_id_is_kept() {
        // Arrange
        let id = RequestId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&id.to_string()).unwrap(),
        );

        // Act
        let result = RequestId::from_headers(&headers);

        // Assert
        assert_eq!(result, Some(id));
    }

    #[test]
    fn malformed_id_is_ignored() {
        for value in ["", "not an id", "AAAA"] {
            // Arrange
            let mut headers = HeaderMap::new();
            headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(value));

            // Act
            let result = RequestId::from_headers(&headers);

            // Assert
            assert_eq!(result, None, "{value:?}");
        }
    }
}
