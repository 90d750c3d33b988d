use inquiry_config::Config;
use tracing::info;

use crate::environment::Provider;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let provider = Provider::connect(&config).await?;
    let server = provider.rest_server()?;

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
