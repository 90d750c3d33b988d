use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiContactResponse;

pub mod contact;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str =
    "メール送信に失敗しました。しばらくしてからもう一度お試しください。";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_MESSAGE)
}

fn error(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(ApiContactResponse {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}
