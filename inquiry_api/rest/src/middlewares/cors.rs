use axum::{
    http::{header, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
