use std::{net::IpAddr, sync::Arc};

use axum::Router;
use inquiry_core_contact_contracts::ContactFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Name of the cookie holding the contact session id
    pub session_cookie: Arc<str>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(config: RestServerConfig, contact: Contact) -> Self {
        Self { config, contact }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let (host, port) = (self.config.host, self.config.port);
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(
            Arc::new(self.contact),
            self.config.session_cookie,
        ));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(router)
    }
}
